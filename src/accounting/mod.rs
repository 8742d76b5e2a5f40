//! Per-loan accounting view: ledger balance plus classifier status plus the
//! day counts and progress every screen shows.

pub mod admission;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::Money;
use crate::ledger;
use crate::model::{Loan, Repayment};
use crate::status;
use crate::types::{CustomerId, LoanId, LoanStatus};

pub use admission::{admit_repayment, can_accept, Admission};

/// derived state of one loan at one as-of date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanView {
    pub loan_id: LoanId,
    pub customer_id: CustomerId,
    pub as_of: NaiveDate,
    pub principal: Money,
    pub collected: Money,
    pub balance: Money,
    pub status: LoanStatus,
    pub due_date: NaiveDate,
    /// due date plus grace period
    pub cutoff_date: NaiveDate,
    /// whole days past the cutoff; 0 unless overdue
    pub days_overdue: u32,
    /// whole days left until the cutoff; 0 when overdue or paid
    pub days_remaining: u32,
    /// share of principal repaid, 0 to 100
    pub repayment_progress_percent: Decimal,
    pub repayment_count: usize,
}

impl LoanView {
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

fn whole_days(from: NaiveDate, to: NaiveDate) -> u32 {
    let days = (to - from).num_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// compute the accounting view of `loan` at `as_of`
pub fn view(loan: &Loan, repayments: &[Repayment], as_of: NaiveDate) -> LoanView {
    let balance = ledger::balance(loan, repayments);
    let status = status::classify(loan, balance, as_of);
    let cutoff_date = loan.cutoff_date();

    let (days_overdue, days_remaining) = match status {
        LoanStatus::Overdue => (whole_days(cutoff_date, as_of), 0),
        LoanStatus::Paid => (0, 0),
        LoanStatus::Pending | LoanStatus::Partial => (0, whole_days(as_of, cutoff_date)),
    };

    let collected = loan.principal - balance;
    let repayment_progress_percent = collected
        .percent_of(loan.principal)
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);

    debug!(
        loan_id = %loan.id,
        %as_of,
        %balance,
        ?status,
        "loan view computed"
    );

    LoanView {
        loan_id: loan.id,
        customer_id: loan.customer_id,
        as_of,
        principal: loan.principal,
        collected,
        balance,
        status,
        due_date: loan.due_date,
        cutoff_date,
        days_overdue,
        days_remaining,
        repayment_progress_percent,
        repayment_count: repayments.len(),
    }
}

/// a loan together with its repayments and derived view, the unit the
/// portfolio aggregator folds over
#[derive(Debug, Clone)]
pub struct LoanAccount<'a> {
    pub loan: &'a Loan,
    pub repayments: &'a [Repayment],
    pub view: LoanView,
    /// date of the settling repayment, only for paid loans
    pub settled_on: Option<NaiveDate>,
}

impl<'a> LoanAccount<'a> {
    pub fn new(loan: &'a Loan, repayments: &'a [Repayment], as_of: NaiveDate) -> Self {
        let view = view(loan, repayments, as_of);
        let settled_on = match view.status {
            LoanStatus::Paid => ledger::settlement_date(loan, repayments),
            _ => None,
        };

        Self {
            loan,
            repayments,
            view,
            settled_on,
        }
    }

    /// whole days from issue to settlement
    pub fn days_to_settle(&self) -> Option<i64> {
        self.settled_on
            .map(|settled| (settled - self.loan.issue_date).num_days())
    }
}
