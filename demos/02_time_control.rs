/// time control - watch a loan move through its statuses with controlled time
use chrono::{Duration, TimeZone, Utc};
use credit_ledger_rs::clock;
use credit_ledger_rs::{Customer, LedgerConfig, Loan, LoanBook, Money, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== time control example ===\n");

    // create controlled time for testing
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
    ));
    let controller = time.test_control().expect("should be in test mode");

    println!("starting date: {}", clock::as_of(&time));

    let mut book = LoanBook::new(LedgerConfig::default());
    let customer_id = book.register_customer(Customer::builder().name("Meena").build()?)?;
    let loan_id = book.issue_loan(
        Loan::builder()
            .customer(customer_id)
            .principal(Money::from_major(1_000))
            .issue_date(clock::as_of(&time))
            .due_date(clock::as_of(&time) + Duration::days(30))
            .grace_period_days(7)
            .description("School uniforms")
            .build()?,
    )?;

    let show = |book: &LoanBook, label: &str| -> Result<(), Box<dyn std::error::Error>> {
        let view = book.view(loan_id, clock::as_of(&time))?;
        println!(
            "{:<24} {}  status {:<8} balance {:>8}  days remaining {:>2}  days overdue {:>2}",
            label,
            view.as_of,
            view.status.label(),
            view.balance,
            view.days_remaining,
            view.days_overdue
        );
        Ok(())
    };

    show(&book, "issued")?;

    controller.advance(Duration::days(10));
    book.record_repayment(loan_id, Money::from_major(400), clock::as_of(&time), None, &time)?;
    show(&book, "paid 400")?;

    controller.advance(Duration::days(27));
    show(&book, "last day of grace")?;

    controller.advance(Duration::days(3));
    show(&book, "three days late")?;

    book.record_repayment(loan_id, Money::from_major(600), clock::as_of(&time), None, &time)?;
    show(&book, "paid remaining 600")?;

    controller.advance(Duration::days(365));
    show(&book, "a year later")?;

    Ok(())
}
