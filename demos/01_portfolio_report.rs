/// portfolio report - overview, overdue grouping and monthly series
use chrono::{Duration, NaiveDate};
use credit_ledger_rs::{Customer, LedgerConfig, Loan, LoanBook, Money};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=credit_ledger_rs=debug shows every derived view
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== portfolio report example ===\n");

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;
    let day = |n: i64| start + Duration::days(n);

    let mut book = LoanBook::new(LedgerConfig::default());

    let asha = book.register_customer(
        Customer::builder()
            .name("Asha Devi")
            .phone("98450 11111")
            .trust_score(8)
            .build()?,
    )?;
    let ravi = book.register_customer(
        Customer::builder()
            .name("Ravi Kumar")
            .phone("98450 22222")
            .credit_limit(Money::from_major(1_500))
            .trust_score(3)
            .build()?,
    )?;

    let groceries = book.issue_loan(
        Loan::builder()
            .customer(asha)
            .principal(Money::from_major(1_000))
            .issue_date(day(0))
            .description("Monthly groceries")
            .build()?,
    )?;
    let cement = book.issue_loan(
        Loan::builder()
            .customer(ravi)
            .principal(Money::from_major(2_400))
            .issue_date(day(5))
            .due_date(day(20))
            .grace_period_days(3)
            .description("Cement bags")
            .build()?,
    )?;
    let seeds = book.issue_loan(
        Loan::builder()
            .customer(ravi)
            .principal(Money::from_major(300))
            .issue_date(day(35))
            .description("Vegetable seeds")
            .build()?,
    )?;

    book.record_repayment_as_of(groceries, Money::from_major(1_000), day(25), None, day(25))?;
    book.record_repayment_as_of(cement, Money::from_major(900), day(12), Some("upi".into()), day(12))?;
    book.record_repayment_as_of(seeds, Money::from_major(100), day(40), None, day(40))?;

    // overpaying is refused and recorded as an event
    if let Err(err) = book.record_repayment_as_of(seeds, Money::from_major(500), day(41), None, day(41)) {
        println!("rejected: {err}");
    }

    let report = book.report(day(45));
    println!("{}", report.to_json_pretty()?);

    println!("\ncustomer exposure:");
    for exposure in book.customer_exposures(day(45)) {
        println!(
            "  {:<12} outstanding {:>8}  limit {:>8}  utilization {}%  over limit: {}",
            exposure.name,
            exposure.total_outstanding,
            exposure.credit_limit,
            exposure.credit_utilization_percent,
            exposure.over_limit
        );
    }

    println!("\nevents:");
    for event in book.take_events() {
        println!("  {:?}", event);
    }

    Ok(())
}
