/// End-to-end loan scenarios through the public API
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use credit_ledger_rs::{
    accounting, can_accept, Customer, Event, LedgerConfig, LedgerError, Loan, LoanBook,
    LoanStatus, Money, Portfolio, PortfolioSnapshot, RejectionKind, Repayment,
    SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;
use uuid::Uuid;

fn day(n: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(n)
}

fn thousand_loan() -> Loan {
    Loan::builder()
        .customer(Uuid::new_v4())
        .principal(Money::from_major(1_000))
        .issue_date(day(0))
        .due_date(day(30))
        .grace_period_days(7)
        .description("Rice and pulses")
        .build()
        .unwrap()
}

#[test]
fn scenario_a_untouched_loan_inside_grace() {
    let loan = thousand_loan();
    let view = accounting::view(&loan, &[], day(30));

    assert_eq!(view.status, LoanStatus::Pending);
    assert_eq!(view.balance, Money::from_major(1_000));
    assert_eq!(view.days_remaining, 7);
    assert_eq!(view.days_overdue, 0);
}

#[test]
fn scenario_b_partial_repayment() {
    let loan = thousand_loan();
    let repayments = vec![Repayment::new(loan.id, Money::from_major(400), day(10))];
    let view = accounting::view(&loan, &repayments, day(30));

    assert_eq!(view.status, LoanStatus::Partial);
    assert_eq!(view.balance, Money::from_major(600));
    assert_eq!(view.repayment_progress_percent, dec!(40));
}

#[test]
fn scenario_c_past_cutoff_is_overdue() {
    let loan = thousand_loan();
    let repayments = vec![Repayment::new(loan.id, Money::from_major(400), day(10))];
    let view = accounting::view(&loan, &repayments, day(40));

    assert_eq!(view.status, LoanStatus::Overdue);
    assert_eq!(view.balance, Money::from_major(600));
    assert_eq!(view.days_overdue, 3);
    assert_eq!(view.days_remaining, 0);
}

#[test]
fn scenario_d_settled_loan_stays_paid() {
    let loan = thousand_loan();
    let repayments = vec![
        Repayment::new(loan.id, Money::from_major(400), day(10)),
        Repayment::new(loan.id, Money::from_major(600), day(40)),
    ];

    for as_of in [day(40), day(41), day(365), day(3_650)] {
        let view = accounting::view(&loan, &repayments, as_of);
        assert_eq!(view.status, LoanStatus::Paid);
        assert_eq!(view.balance, Money::ZERO);
        assert_eq!(view.days_overdue, 0);
    }
}

#[test]
fn scenario_e_repayment_over_balance_rejected() {
    let loan = thousand_loan();
    let repayments = vec![Repayment::new(loan.id, Money::from_major(400), day(10))];

    let err = can_accept(&loan, &repayments, Money::from_major(700)).unwrap_err();
    assert_eq!(err.kind(), RejectionKind::ExceedsBalance);
    match err {
        LedgerError::ExceedsBalance { balance, requested } => {
            assert_eq!(balance, Money::from_major(600));
            assert_eq!(requested, Money::from_major(700));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_lifecycle_with_controlled_time() {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
    ));
    let control = time.test_control().unwrap();

    let mut book = LoanBook::new(LedgerConfig::default());
    let customer = Customer::builder()
        .name("Ravi Kumar")
        .phone("98450 00000")
        .build()
        .unwrap();
    let customer_id = book.register_customer(customer).unwrap();

    let loan = Loan::builder()
        .customer(customer_id)
        .principal(Money::from_major(1_000))
        .issue_date(day(0))
        .due_date(day(30))
        .grace_period_days(7)
        .description("Rice and pulses")
        .build()
        .unwrap();
    let loan_id = book.issue_loan(loan).unwrap();

    control.advance(Duration::days(10));
    book.record_repayment(loan_id, Money::from_major(400), day(10), None, &time)
        .unwrap();

    // a future-dated entry is refused
    let err = book
        .record_repayment(loan_id, Money::from_major(100), day(11), None, &time)
        .unwrap_err();
    assert_eq!(err.kind(), RejectionKind::PaymentInFuture);

    control.advance(Duration::days(27));
    assert_eq!(book.view(loan_id, day(37)).unwrap().status, LoanStatus::Partial);

    control.advance(Duration::days(3));
    let report = book.report(day(40));
    assert_eq!(report.overview.overdue_loan_count, 1);
    assert_eq!(report.overdue.len(), 1);
    assert_eq!(report.overdue[0].total_overdue, Money::from_major(600));
    assert_eq!(report.overdue[0].loans[0].days_overdue, 3);

    book.record_repayment(loan_id, Money::from_major(600), day(40), None, &time)
        .unwrap();
    let report = book.report(day(40));
    assert_eq!(report.overview.paid_loan_count, 1);
    assert_eq!(report.overview.total_outstanding, Money::ZERO);
    assert_eq!(report.overview.avg_repayment_time, dec!(40));
    assert!(report.overdue.is_empty());

    let closed = book
        .record_repayment(loan_id, Money::from_major(1), day(40), None, &time)
        .unwrap_err();
    assert_eq!(closed.kind(), RejectionKind::LoanClosed);

    let settled = book
        .events()
        .iter()
        .filter(|e| matches!(e, Event::LoanSettled { .. }))
        .count();
    assert_eq!(settled, 1);
}

#[test]
fn test_report_json_uses_presentation_names() {
    let loan = thousand_loan();
    let repayments = vec![Repayment::new(loan.id, Money::from_major(400), day(10))];
    let snapshot = PortfolioSnapshot::from_records(vec![], vec![loan], repayments);

    let json = Portfolio::new(&snapshot, day(40))
        .report()
        .to_json_pretty()
        .unwrap();

    assert!(json.contains("\"totalLoaned\": \"1000.00\""));
    assert!(json.contains("\"totalOutstanding\": \"600.00\""));
    assert!(json.contains("\"overdueLoanCount\": 1"));
    assert!(json.contains("\"month\": \"2024-01\""));
}
