//! Bridge from a time provider to the as-of date the core computes against.
//!
//! Nothing in this crate reads the system clock on its own. Callers either
//! pass a date or hand over a [`SafeTimeProvider`], which tests drive with
//! `TimeSource::Test`.

use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;

use crate::accounting::{self, LoanView};
use crate::model::{Loan, Repayment};

/// calendar date (UTC) of the provider's current instant
pub fn as_of(time: &SafeTimeProvider) -> NaiveDate {
    time.now().date_naive()
}

/// accounting view at the provider's current date
pub fn view_now(loan: &Loan, repayments: &[Repayment], time: &SafeTimeProvider) -> LoanView {
    accounting::view(loan, repayments, as_of(time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use crate::types::LoanStatus;
    use chrono::{Duration, TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use uuid::Uuid;

    #[test]
    fn test_as_of_follows_test_time() {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 0).unwrap(),
        ));
        let control = time.test_control().unwrap();

        assert_eq!(as_of(&time), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        control.advance(Duration::minutes(2));
        assert_eq!(as_of(&time), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_view_moves_into_overdue_as_time_advances() {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        ));
        let control = time.test_control().unwrap();

        let loan = Loan::builder()
            .customer(Uuid::new_v4())
            .principal(Money::from_major(500))
            .issue_date(as_of(&time))
            .due_date(as_of(&time) + Duration::days(10))
            .grace_period_days(2)
            .description("Seeds")
            .build()
            .unwrap();

        assert_eq!(view_now(&loan, &[], &time).status, LoanStatus::Pending);

        control.advance(Duration::days(12));
        assert_eq!(view_now(&loan, &[], &time).status, LoanStatus::Pending);

        control.advance(Duration::days(1));
        let view = view_now(&loan, &[], &time);
        assert_eq!(view.status, LoanStatus::Overdue);
        assert_eq!(view.days_overdue, 1);
    }
}
