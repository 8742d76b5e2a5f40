use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::RejectionKind;
use crate::types::{CustomerId, LoanId, LoanStatus, RepaymentId};

/// events emitted by the book's write path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    CustomerRegistered {
        customer_id: CustomerId,
        credit_limit: Money,
    },
    CustomerRemoved {
        customer_id: CustomerId,
        loans_removed: usize,
        repayments_removed: usize,
    },
    LoanIssued {
        loan_id: LoanId,
        customer_id: CustomerId,
        principal: Money,
        issue_date: NaiveDate,
        due_date: NaiveDate,
    },
    RepaymentRecorded {
        loan_id: LoanId,
        repayment_id: RepaymentId,
        amount: Money,
        payment_date: NaiveDate,
        new_balance: Money,
        status: LoanStatus,
    },
    RepaymentRejected {
        loan_id: LoanId,
        amount: Money,
        kind: RejectionKind,
        reason: String,
    },
    LoanSettled {
        loan_id: LoanId,
        final_payment: Money,
        settled_on: NaiveDate,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
