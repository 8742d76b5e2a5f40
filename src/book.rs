//! In-memory loan book.
//!
//! `LoanBook` stands in for the data source and persistence collaborators.
//! It owns the records, and every write goes through `&mut self`, so writes
//! are serialized and a repayment is admitted against the latest repayment
//! set immediately before it is appended.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::accounting::{self, LoanView};
use crate::clock;
use crate::config::LedgerConfig;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::events::{Event, EventStore};
use crate::ledger::{self, StatementLine};
use crate::model::{Customer, Loan, Repayment};
use crate::portfolio::{
    check_credit_headroom, CustomerExposure, LoanRecord, Portfolio, PortfolioReport,
    PortfolioSnapshot,
};
use crate::types::{CustomerId, LoanId};

/// serialized form of a book
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookState {
    pub customers: Vec<Customer>,
    pub loans: Vec<Loan>,
    pub repayments: Vec<Repayment>,
}

#[derive(Debug, Default)]
pub struct LoanBook {
    config: LedgerConfig,
    customers: BTreeMap<CustomerId, Customer>,
    loans: BTreeMap<LoanId, Loan>,
    repayments: BTreeMap<LoanId, Vec<Repayment>>,
    events: EventStore,
}

impl LoanBook {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    pub fn customer(&self, id: CustomerId) -> Result<&Customer> {
        self.customers
            .get(&id)
            .ok_or(LedgerError::CustomerNotFound { id })
    }

    pub fn loan(&self, id: LoanId) -> Result<&Loan> {
        self.loans.get(&id).ok_or(LedgerError::LoanNotFound { id })
    }

    /// repayments of a loan in recording order
    pub fn repayments(&self, loan_id: LoanId) -> &[Repayment] {
        self.repayments
            .get(&loan_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn loans_for(&self, customer_id: CustomerId) -> impl Iterator<Item = &Loan> {
        self.loans
            .values()
            .filter(move |loan| loan.customer_id == customer_id)
    }

    pub fn register_customer(&mut self, customer: Customer) -> Result<CustomerId> {
        customer.validate()?;

        let id = customer.id;
        info!(customer_id = %id, name = %customer.name, "customer registered");
        self.events.emit(Event::CustomerRegistered {
            customer_id: id,
            credit_limit: customer.credit_limit,
        });
        self.customers.insert(id, customer);
        Ok(id)
    }

    /// delete a customer together with their loans and repayments
    pub fn remove_customer(&mut self, id: CustomerId) -> Result<()> {
        self.customers
            .remove(&id)
            .ok_or(LedgerError::CustomerNotFound { id })?;

        let loan_ids: Vec<LoanId> = self.loans_for(id).map(|loan| loan.id).collect();
        let mut repayments_removed = 0;
        for loan_id in &loan_ids {
            self.loans.remove(loan_id);
            repayments_removed += self.repayments.remove(loan_id).map_or(0, |r| r.len());
        }

        info!(
            customer_id = %id,
            loans = loan_ids.len(),
            repayments = repayments_removed,
            "customer removed"
        );
        self.events.emit(Event::CustomerRemoved {
            customer_id: id,
            loans_removed: loan_ids.len(),
            repayments_removed,
        });
        Ok(())
    }

    /// sum of balances of the customer's unpaid loans
    pub fn customer_outstanding(&self, customer_id: CustomerId) -> Money {
        self.loans_for(customer_id)
            .map(|loan| ledger::balance(loan, self.repayments(loan.id)))
            .sum()
    }

    pub fn issue_loan(&mut self, loan: Loan) -> Result<LoanId> {
        loan.validate()?;
        let customer = self.customer(loan.customer_id)?;

        if self.loans.contains_key(&loan.id) {
            return Err(LedgerError::InvalidLoanTerms {
                message: format!("loan {} already exists", loan.id),
            });
        }

        if self.config.admission.enforce_credit_limit {
            let outstanding = self.customer_outstanding(customer.id);
            if let Err(err) = check_credit_headroom(customer, outstanding, loan.principal) {
                warn!(customer_id = %customer.id, principal = %loan.principal, error = %err, "loan rejected");
                return Err(err);
            }
        }

        let id = loan.id;
        info!(
            loan_id = %id,
            customer_id = %loan.customer_id,
            principal = %loan.principal,
            due_date = %loan.due_date,
            "loan issued"
        );
        self.events.emit(Event::LoanIssued {
            loan_id: id,
            customer_id: loan.customer_id,
            principal: loan.principal,
            issue_date: loan.issue_date,
            due_date: loan.due_date,
        });
        self.loans.insert(id, loan);
        Ok(id)
    }

    /// record a repayment, taking today's date from the time provider
    pub fn record_repayment(
        &mut self,
        loan_id: LoanId,
        amount: Money,
        payment_date: NaiveDate,
        notes: Option<String>,
        time: &SafeTimeProvider,
    ) -> Result<Repayment> {
        self.record_repayment_as_of(loan_id, amount, payment_date, notes, clock::as_of(time))
    }

    /// record a repayment after admitting it against the current repayments
    pub fn record_repayment_as_of(
        &mut self,
        loan_id: LoanId,
        amount: Money,
        payment_date: NaiveDate,
        notes: Option<String>,
        as_of: NaiveDate,
    ) -> Result<Repayment> {
        let loan = self.loan(loan_id)?;
        let existing = self.repayments(loan_id);

        let admission = match accounting::admit_repayment(
            loan,
            existing,
            amount,
            payment_date,
            as_of,
            &self.config.admission,
        ) {
            Ok(admission) => admission,
            Err(err) => {
                self.events.emit(Event::RepaymentRejected {
                    loan_id,
                    amount,
                    kind: err.kind(),
                    reason: err.to_string(),
                });
                return Err(err);
            }
        };

        let mut repayment = Repayment::new(loan_id, amount, payment_date);
        if let Some(notes) = notes {
            repayment = repayment.with_notes(notes);
        }

        let entries = self.repayments.entry(loan_id).or_default();
        entries.push(repayment.clone());

        let loan = self.loan(loan_id)?;
        let view = accounting::view(loan, self.repayments(loan_id), as_of);

        info!(
            %loan_id,
            %amount,
            balance = %view.balance,
            status = ?view.status,
            "repayment recorded"
        );
        self.events.emit(Event::RepaymentRecorded {
            loan_id,
            repayment_id: repayment.id,
            amount,
            payment_date,
            new_balance: view.balance,
            status: view.status,
        });

        if admission.settles_loan {
            self.events.emit(Event::LoanSettled {
                loan_id,
                final_payment: amount,
                settled_on: payment_date,
            });
        }

        Ok(repayment)
    }

    pub fn view(&self, loan_id: LoanId, as_of: NaiveDate) -> Result<LoanView> {
        let loan = self.loan(loan_id)?;
        Ok(accounting::view(loan, self.repayments(loan_id), as_of))
    }

    pub fn statement(&self, loan_id: LoanId) -> Result<Vec<StatementLine>> {
        let loan = self.loan(loan_id)?;
        Ok(ledger::statement(loan, self.repayments(loan_id)))
    }

    /// copy of every record, loans ordered by issue date
    pub fn snapshot(&self) -> PortfolioSnapshot {
        let mut loans: Vec<LoanRecord> = self
            .loans
            .values()
            .map(|loan| LoanRecord {
                loan: loan.clone(),
                repayments: self.repayments(loan.id).to_vec(),
            })
            .collect();
        loans.sort_by(|a, b| {
            a.loan
                .issue_date
                .cmp(&b.loan.issue_date)
                .then_with(|| a.loan.id.cmp(&b.loan.id))
        });

        PortfolioSnapshot {
            customers: self.customers.values().cloned().collect(),
            loans,
        }
    }

    pub fn report(&self, as_of: NaiveDate) -> PortfolioReport {
        let snapshot = self.snapshot();
        Portfolio::new(&snapshot, as_of).report()
    }

    pub fn customer_exposures(&self, as_of: NaiveDate) -> Vec<CustomerExposure> {
        let snapshot = self.snapshot();
        Portfolio::new(&snapshot, as_of).exposures()
    }

    pub fn state(&self) -> BookState {
        BookState {
            customers: self.customers.values().cloned().collect(),
            loans: self.loans.values().cloned().collect(),
            repayments: self.repayments.values().flatten().cloned().collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.state())?)
    }

    /// rebuild a book from exported state; records are validated but
    /// historical repayments are not re-admitted
    pub fn from_state(state: BookState, config: LedgerConfig) -> Result<Self> {
        let mut book = Self::new(config);

        for customer in state.customers {
            customer.validate()?;
            book.customers.insert(customer.id, customer);
        }

        for loan in state.loans {
            loan.validate()?;
            if !book.customers.contains_key(&loan.customer_id) {
                return Err(LedgerError::CustomerNotFound {
                    id: loan.customer_id,
                });
            }
            book.loans.insert(loan.id, loan);
        }

        for repayment in state.repayments {
            repayment.validate()?;
            if !book.loans.contains_key(&repayment.loan_id) {
                return Err(LedgerError::LoanNotFound {
                    id: repayment.loan_id,
                });
            }
            book.repayments
                .entry(repayment.loan_id)
                .or_default()
                .push(repayment);
        }

        Ok(book)
    }

    pub fn from_json_str(json: &str, config: LedgerConfig) -> Result<Self> {
        let state: BookState = serde_json::from_str(json)?;
        Self::from_state(state, config)
    }
}
