use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounting::LoanAccount;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::model::Customer;
use crate::types::{CustomerId, LoanStatus, TrustBand};

/// a customer's derived outstanding total against their credit limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerExposure {
    pub customer_id: CustomerId,
    pub name: String,
    /// sum of balances of the customer's unpaid loans
    pub total_outstanding: Money,
    pub credit_limit: Money,
    pub available_credit: Money,
    /// outstanding as a share of the limit, not capped at 100
    pub credit_utilization_percent: Decimal,
    pub over_limit: bool,
    pub active_loan_count: usize,
    pub overdue_loan_count: usize,
    pub trust_score: u8,
    pub trust_band: TrustBand,
}

#[derive(Default)]
struct Tally {
    outstanding: Money,
    active: usize,
    overdue: usize,
}

/// exposure per customer, in the order the customers are given
pub fn customer_exposures(
    customers: &[Customer],
    accounts: &[LoanAccount<'_>],
) -> Vec<CustomerExposure> {
    let mut tallies: BTreeMap<CustomerId, Tally> = BTreeMap::new();

    for account in accounts.iter().filter(|a| a.view.status.is_open()) {
        let tally = tallies.entry(account.loan.customer_id).or_default();
        tally.outstanding += account.view.balance;
        tally.active += 1;
        if account.view.status == LoanStatus::Overdue {
            tally.overdue += 1;
        }
    }

    customers
        .iter()
        .map(|customer| {
            let tally = tallies.remove(&customer.id).unwrap_or_default();
            CustomerExposure {
                customer_id: customer.id,
                name: customer.name.clone(),
                total_outstanding: tally.outstanding,
                credit_limit: customer.credit_limit,
                available_credit: (customer.credit_limit - tally.outstanding).max(Money::ZERO),
                credit_utilization_percent: tally.outstanding.percent_of(customer.credit_limit),
                over_limit: tally.outstanding > customer.credit_limit,
                active_loan_count: tally.active,
                overdue_loan_count: tally.overdue,
                trust_score: customer.trust_score,
                trust_band: customer.trust_band(),
            }
        })
        .collect()
}

/// reject a new loan that would take the customer past their credit limit
pub fn check_credit_headroom(
    customer: &Customer,
    current_outstanding: Money,
    new_principal: Money,
) -> Result<()> {
    let requested = current_outstanding + new_principal;
    if requested > customer.credit_limit {
        return Err(LedgerError::CreditLimitExceeded {
            limit: customer.credit_limit,
            requested,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Loan, Repayment};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn day(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap() + chrono::Duration::days(n)
    }

    fn loan(customer: &Customer, principal: i64, due: i64) -> Loan {
        Loan::builder()
            .customer(customer.id)
            .principal(Money::from_major(principal))
            .issue_date(day(0))
            .due_date(day(due))
            .grace_period_days(0)
            .description("Tailoring cloth")
            .build()
            .unwrap()
    }

    #[test]
    fn test_exposure_sums_unpaid_loans() {
        let asha = Customer::builder()
            .name("Asha")
            .credit_limit(Money::from_major(1_000))
            .trust_score(8)
            .build()
            .unwrap();
        let idle = Customer::builder().name("Idle").build().unwrap();

        let open = loan(&asha, 600, 30);
        let late = loan(&asha, 700, 2);
        let closed = loan(&asha, 200, 30);
        let open_pay = vec![Repayment::new(open.id, Money::from_major(100), day(1))];
        let closed_pay = vec![Repayment::new(closed.id, Money::from_major(200), day(1))];

        let as_of = day(5);
        let accounts = vec![
            LoanAccount::new(&open, &open_pay, as_of),
            LoanAccount::new(&late, &[], as_of),
            LoanAccount::new(&closed, &closed_pay, as_of),
        ];

        let exposures = customer_exposures(&[asha.clone(), idle.clone()], &accounts);

        assert_eq!(exposures.len(), 2);
        let a = &exposures[0];
        assert_eq!(a.total_outstanding, Money::from_major(1_200));
        assert_eq!(a.active_loan_count, 2);
        assert_eq!(a.overdue_loan_count, 1);
        assert!(a.over_limit);
        assert_eq!(a.available_credit, Money::ZERO);
        assert_eq!(a.credit_utilization_percent, dec!(120));
        assert_eq!(a.trust_band, TrustBand::High);

        let i = &exposures[1];
        assert_eq!(i.total_outstanding, Money::ZERO);
        assert_eq!(i.active_loan_count, 0);
        assert_eq!(i.available_credit, Money::from_major(5_000));
        assert!(!i.over_limit);
    }

    #[test]
    fn test_zero_limit_utilization() {
        let c = Customer::builder()
            .name("Cash only")
            .credit_limit(Money::ZERO)
            .build()
            .unwrap();
        let exposures = customer_exposures(&[c], &[]);
        assert_eq!(exposures[0].credit_utilization_percent, Decimal::ZERO);
    }

    #[test]
    fn test_credit_headroom() {
        let c = Customer::builder()
            .name("Meena")
            .credit_limit(Money::from_major(1_000))
            .build()
            .unwrap();

        assert!(check_credit_headroom(&c, Money::from_major(400), Money::from_major(600)).is_ok());

        let err = check_credit_headroom(&c, Money::from_major(400), Money::from_major(601))
            .unwrap_err();
        match err {
            LedgerError::CreditLimitExceeded { limit, requested } => {
                assert_eq!(limit, Money::from_major(1_000));
                assert_eq!(requested, Money::from_major(1_001));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
