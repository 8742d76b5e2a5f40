use std::collections::BTreeSet;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::accounting::LoanAccount;
use crate::decimal::Money;
use crate::types::LoanStatus;

/// portfolio totals and status counts
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_loaned: Money,
    pub total_collected: Money,
    pub total_outstanding: Money,
    pub loan_count: usize,
    pub pending_loan_count: usize,
    pub partial_loan_count: usize,
    pub overdue_loan_count: usize,
    pub paid_loan_count: usize,
    pub customers_with_active_loans: usize,
    pub overdue_amount: Money,
    /// mean days from issue to settlement over paid loans
    pub avg_repayment_time: Decimal,
    pub collection_rate_percent: Decimal,
    pub outstanding_rate_percent: Decimal,
    pub overdue_rate_percent: Decimal,
}

/// fold loan accounts into the overview
pub fn overview(accounts: &[LoanAccount<'_>]) -> Overview {
    let mut summary = Overview::default();
    let mut active_customers = BTreeSet::new();
    let mut settle_days_total: i64 = 0;
    let mut settled_count: i64 = 0;

    for account in accounts {
        let view = &account.view;

        summary.loan_count += 1;
        summary.total_loaned += view.principal;
        summary.total_collected += view.collected;
        summary.total_outstanding += view.balance;

        match view.status {
            LoanStatus::Pending => summary.pending_loan_count += 1,
            LoanStatus::Partial => summary.partial_loan_count += 1,
            LoanStatus::Overdue => {
                summary.overdue_loan_count += 1;
                summary.overdue_amount += view.balance;
            }
            LoanStatus::Paid => summary.paid_loan_count += 1,
        }

        if view.balance.is_positive() {
            active_customers.insert(view.customer_id);
        }

        if let Some(days) = account.days_to_settle() {
            settle_days_total += days;
            settled_count += 1;
        }
    }

    summary.customers_with_active_loans = active_customers.len();

    if settled_count > 0 {
        summary.avg_repayment_time =
            round_one_place(Decimal::from(settle_days_total) / Decimal::from(settled_count));
    }

    summary.collection_rate_percent = rate(summary.total_collected, summary.total_loaned);
    summary.outstanding_rate_percent = rate(summary.total_outstanding, summary.total_loaned);
    summary.overdue_rate_percent = rate(summary.overdue_amount, summary.total_outstanding);

    summary
}

/// one decimal place, half away from zero
fn round_one_place(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// `100 * part / whole` to 1 dp; zero when `whole` is zero
fn rate(part: Money, whole: Money) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    round_one_place(
        Decimal::from(part.minor()) * Decimal::ONE_HUNDRED / Decimal::from(whole.minor()),
    )
}
