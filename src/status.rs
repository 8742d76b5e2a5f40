//! Loan status classifier.
//!
//! Status is recomputed on every call from the balance and an explicit
//! as-of date. Precedence is paid, then overdue, then partial, then pending.

use chrono::NaiveDate;

use crate::decimal::Money;
use crate::model::Loan;
use crate::types::LoanStatus;

/// true once `as_of` is strictly after due date plus grace period
pub fn is_past_cutoff(loan: &Loan, as_of: NaiveDate) -> bool {
    as_of > loan.cutoff_date()
}

/// derive a loan's status from its balance at `as_of`
pub fn classify(loan: &Loan, balance: Money, as_of: NaiveDate) -> LoanStatus {
    if !balance.is_positive() {
        return LoanStatus::Paid;
    }

    if is_past_cutoff(loan, as_of) {
        return LoanStatus::Overdue;
    }

    if balance < loan.principal {
        LoanStatus::Partial
    } else {
        LoanStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn day(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(n)
    }

    fn loan() -> Loan {
        Loan::builder()
            .customer(Uuid::new_v4())
            .principal(Money::from_major(1_000))
            .issue_date(day(0))
            .due_date(day(30))
            .grace_period_days(7)
            .description("Cement bags")
            .build()
            .unwrap()
    }

    #[test]
    fn test_pending_until_repaid() {
        let loan = loan();
        assert_eq!(classify(&loan, loan.principal, day(0)), LoanStatus::Pending);
        assert_eq!(classify(&loan, loan.principal, day(30)), LoanStatus::Pending);
    }

    #[test]
    fn test_partial() {
        let loan = loan();
        assert_eq!(
            classify(&loan, Money::from_major(600), day(30)),
            LoanStatus::Partial
        );
    }

    #[test]
    fn test_grace_boundary() {
        let loan = loan();
        let balance = Money::from_major(600);
        assert_eq!(classify(&loan, balance, day(37)), LoanStatus::Partial);
        assert_eq!(classify(&loan, balance, day(38)), LoanStatus::Overdue);
    }

    #[test]
    fn test_overdue_dominates_untouched_balance() {
        let loan = loan();
        assert_eq!(classify(&loan, loan.principal, day(38)), LoanStatus::Overdue);
    }

    #[test]
    fn test_paid_dominates_everything() {
        let loan = loan();
        assert_eq!(classify(&loan, Money::ZERO, day(5)), LoanStatus::Paid);
        assert_eq!(classify(&loan, Money::ZERO, day(5_000)), LoanStatus::Paid);
    }

    #[test]
    fn test_overdue_can_be_left_by_moving_as_of_back() {
        let loan = loan();
        let balance = Money::from_major(1);
        assert_eq!(classify(&loan, balance, day(100)), LoanStatus::Overdue);
        assert_eq!(classify(&loan, balance, day(10)), LoanStatus::Partial);
    }
}
