use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::LedgerConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::types::{CustomerId, LoanId};

const MIN_DESCRIPTION_LEN: usize = 3;

/// a loan extended to one customer
///
/// Balance and status are not fields here. They are derived from the loan's
/// repayments by [`crate::ledger`] and [`crate::status`] every time they are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub customer_id: CustomerId,
    pub principal: Money,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub grace_period_days: u32,
    /// advisory annual rate, never added to the balance
    pub interest_rate: Rate,
    pub description: String,
    pub notes: Option<String>,
}

impl Loan {
    pub fn builder() -> LoanBuilder {
        LoanBuilder::new()
    }

    /// last day on which a remaining balance is still not overdue
    pub fn cutoff_date(&self) -> NaiveDate {
        self.due_date
            .checked_add_signed(Duration::days(self.grace_period_days as i64))
            .unwrap_or(NaiveDate::MAX)
    }

    /// re-check terms on a record that did not come through the builder
    pub fn validate(&self) -> Result<()> {
        validate_terms(
            self.principal,
            self.issue_date,
            self.due_date,
            self.grace_period_days as i64,
            self.interest_rate,
            &self.description,
        )
    }
}

fn invalid_terms(message: impl Into<String>) -> LedgerError {
    LedgerError::InvalidLoanTerms {
        message: message.into(),
    }
}

fn validate_terms(
    principal: Money,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    grace_period_days: i64,
    interest_rate: Rate,
    description: &str,
) -> Result<()> {
    if !principal.is_positive() {
        return Err(invalid_terms(format!(
            "principal must be greater than zero, got {}",
            principal
        )));
    }

    if due_date < issue_date {
        return Err(invalid_terms(format!(
            "due date {} is before issue date {}",
            due_date, issue_date
        )));
    }

    if grace_period_days < 0 {
        return Err(invalid_terms(format!(
            "grace period cannot be negative, got {} days",
            grace_period_days
        )));
    }

    if grace_period_days > u32::MAX as i64 {
        return Err(invalid_terms("grace period is too long"));
    }

    if interest_rate.is_negative() {
        return Err(invalid_terms(format!(
            "interest rate cannot be negative, got {}",
            interest_rate
        )));
    }

    if description.trim().chars().count() < MIN_DESCRIPTION_LEN {
        return Err(invalid_terms(format!(
            "description must be at least {} characters",
            MIN_DESCRIPTION_LEN
        )));
    }

    Ok(())
}

/// builder for loans
#[derive(Debug, Default)]
pub struct LoanBuilder {
    id: Option<LoanId>,
    customer_id: Option<CustomerId>,
    principal: Option<Money>,
    issue_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    grace_period_days: Option<i64>,
    interest_rate: Option<Rate>,
    description: Option<String>,
    notes: Option<String>,
}

impl LoanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: LoanId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn customer(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn issue_date(mut self, date: NaiveDate) -> Self {
        self.issue_date = Some(date);
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    /// signed so that negative input from a form is reported, not truncated
    pub fn grace_period_days(mut self, days: i64) -> Self {
        self.grace_period_days = Some(days);
        self
    }

    pub fn interest_rate(mut self, rate: Rate) -> Self {
        self.interest_rate = Some(rate);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// build with the default configuration
    pub fn build(self) -> Result<Loan> {
        self.build_with_config(&LedgerConfig::default())
    }

    /// build, taking omitted due date and grace period from `config`
    pub fn build_with_config(self, config: &LedgerConfig) -> Result<Loan> {
        let customer_id = self
            .customer_id
            .ok_or_else(|| invalid_terms("customer required"))?;

        let principal = self
            .principal
            .ok_or_else(|| invalid_terms("principal required"))?;

        let issue_date = self
            .issue_date
            .ok_or_else(|| invalid_terms("issue date required"))?;

        let due_date = match self.due_date {
            Some(date) => date,
            None => issue_date
                .checked_add_signed(Duration::days(config.default_term_days as i64))
                .ok_or_else(|| invalid_terms("due date out of range"))?,
        };

        let grace_period_days = self
            .grace_period_days
            .unwrap_or(config.default_grace_period_days as i64);

        let interest_rate = self.interest_rate.unwrap_or(Rate::ZERO);
        let description = self.description.unwrap_or_default();

        validate_terms(
            principal,
            issue_date,
            due_date,
            grace_period_days,
            interest_rate,
            &description,
        )?;

        Ok(Loan {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            customer_id,
            principal,
            issue_date,
            due_date,
            grace_period_days: grace_period_days as u32,
            interest_rate,
            description: description.trim().to_string(),
            notes: self.notes.filter(|n| !n.trim().is_empty()),
        })
    }
}
