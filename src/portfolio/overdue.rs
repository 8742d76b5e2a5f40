use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::accounting::LoanAccount;
use crate::decimal::Money;
use crate::model::Customer;
use crate::types::{CustomerId, LoanId, LoanStatus};

/// contact details shown next to an overdue group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerContact {
    pub name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueLoan {
    pub loan_id: LoanId,
    pub description: String,
    pub principal: Money,
    pub balance: Money,
    pub due_date: NaiveDate,
    pub days_overdue: u32,
}

/// one customer's overdue loans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueGroup {
    pub customer_id: CustomerId,
    /// absent when the customer record is not in the snapshot
    pub customer: Option<CustomerContact>,
    pub total_overdue: Money,
    pub loans: Vec<OverdueLoan>,
}

/// group overdue loans by customer, largest total first
pub fn overdue_groups(
    accounts: &[LoanAccount<'_>],
    customers: &BTreeMap<CustomerId, &Customer>,
) -> Vec<OverdueGroup> {
    let mut grouped: BTreeMap<CustomerId, Vec<OverdueLoan>> = BTreeMap::new();

    for account in accounts.iter().filter(|a| a.view.status == LoanStatus::Overdue) {
        grouped
            .entry(account.loan.customer_id)
            .or_default()
            .push(OverdueLoan {
                loan_id: account.loan.id,
                description: account.loan.description.clone(),
                principal: account.view.principal,
                balance: account.view.balance,
                due_date: account.loan.due_date,
                days_overdue: account.view.days_overdue,
            });
    }

    let mut groups: Vec<OverdueGroup> = grouped
        .into_iter()
        .map(|(customer_id, mut loans)| {
            loans.sort_by(|a, b| {
                b.days_overdue
                    .cmp(&a.days_overdue)
                    .then_with(|| a.loan_id.cmp(&b.loan_id))
            });

            OverdueGroup {
                customer_id,
                customer: customers.get(&customer_id).map(|c| CustomerContact {
                    name: c.name.clone(),
                    phone: c.phone.clone(),
                }),
                total_overdue: loans.iter().map(|l| l.balance).sum(),
                loans,
            }
        })
        .collect();

    // map iteration already ordered ties by customer id
    groups.sort_by(|a, b| b.total_overdue.cmp(&a.total_overdue));
    groups
}
