/// quick start - minimal example to get started
use chrono::NaiveDate;
use credit_ledger_rs::{Customer, LedgerConfig, Loan, LoanBook, Money};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut book = LoanBook::new(LedgerConfig::default());

    // register a customer
    let customer_id = book.register_customer(Customer::builder().name("Asha Devi").build()?)?;

    // give ₹1,000 of goods on credit, due in 30 days
    let issued = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;
    let loan = Loan::builder()
        .customer(customer_id)
        .principal(Money::from_major(1_000))
        .issue_date(issued)
        .description("Monthly groceries")
        .build()?;
    let loan_id = book.issue_loan(loan)?;

    // record a repayment ten days later
    let paid_on = NaiveDate::from_ymd_opt(2024, 1, 11).ok_or("bad date")?;
    book.record_repayment_as_of(loan_id, Money::from_major(400), paid_on, None, paid_on)?;

    // print the loan as of the end of the month
    let as_of = NaiveDate::from_ymd_opt(2024, 1, 31).ok_or("bad date")?;
    println!("{}", serde_json::to_string_pretty(&book.view(loan_id, as_of)?)?);

    Ok(())
}
