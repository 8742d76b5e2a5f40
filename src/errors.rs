use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decimal::Money;
use crate::types::{CustomerId, LoanId};

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid repayment amount: {amount}")]
    InvalidAmount {
        amount: Money,
    },

    #[error("repayment exceeds balance: balance {balance}, requested {requested}")]
    ExceedsBalance {
        balance: Money,
        requested: Money,
    },

    #[error("loan {loan_id} is already paid")]
    LoanClosed {
        loan_id: LoanId,
    },

    #[error("invalid loan terms: {message}")]
    InvalidLoanTerms {
        message: String,
    },

    #[error("invalid customer: {message}")]
    InvalidCustomer {
        message: String,
    },

    #[error("payment date {payment_date} is before loan issue date {issue_date}")]
    PaymentBeforeIssue {
        payment_date: NaiveDate,
        issue_date: NaiveDate,
    },

    #[error("payment date {payment_date} is after {as_of}")]
    PaymentInFuture {
        payment_date: NaiveDate,
        as_of: NaiveDate,
    },

    #[error("credit limit exceeded: limit {limit}, requested {requested}")]
    CreditLimitExceeded {
        limit: Money,
        requested: Money,
    },

    #[error("loan not found: {id}")]
    LoanNotFound {
        id: LoanId,
    },

    #[error("customer not found: {id}")]
    CustomerNotFound {
        id: CustomerId,
    },

    #[error("invalid money value: {value}")]
    InvalidMoney {
        value: String,
    },

    #[error("invalid month (expected YYYY-MM): {value}")]
    InvalidMonth {
        value: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// payload-free classification of a [`LedgerError`], for callers that only
/// need to pick a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionKind {
    InvalidAmount,
    ExceedsBalance,
    LoanClosed,
    InvalidLoanTerms,
    InvalidCustomer,
    PaymentBeforeIssue,
    PaymentInFuture,
    CreditLimitExceeded,
    NotFound,
    InvalidInput,
}

impl LedgerError {
    pub fn kind(&self) -> RejectionKind {
        match self {
            LedgerError::InvalidAmount { .. } => RejectionKind::InvalidAmount,
            LedgerError::ExceedsBalance { .. } => RejectionKind::ExceedsBalance,
            LedgerError::LoanClosed { .. } => RejectionKind::LoanClosed,
            LedgerError::InvalidLoanTerms { .. } => RejectionKind::InvalidLoanTerms,
            LedgerError::InvalidCustomer { .. } => RejectionKind::InvalidCustomer,
            LedgerError::PaymentBeforeIssue { .. } => RejectionKind::PaymentBeforeIssue,
            LedgerError::PaymentInFuture { .. } => RejectionKind::PaymentInFuture,
            LedgerError::CreditLimitExceeded { .. } => RejectionKind::CreditLimitExceeded,
            LedgerError::LoanNotFound { .. } | LedgerError::CustomerNotFound { .. } => {
                RejectionKind::NotFound
            }
            LedgerError::InvalidMoney { .. }
            | LedgerError::InvalidMonth { .. }
            | LedgerError::Serialization(_) => RejectionKind::InvalidInput,
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
