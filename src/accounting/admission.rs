//! Repayment admission.
//!
//! These checks decide whether a repayment may be recorded. They do not record
//! anything. A caller that persists repayments must re-run the check against
//! the latest committed repayments immediately before the write, with writes
//! serialized per loan.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AdmissionPolicy;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::ledger;
use crate::model::{Loan, Repayment};
use crate::types::LoanId;

/// an accepted repayment and its effect on the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admission {
    pub loan_id: LoanId,
    pub amount: Money,
    pub balance_before: Money,
    pub balance_after: Money,
    /// this repayment brings the balance to zero
    pub settles_loan: bool,
}

/// amount checks against the current balance
pub fn can_accept(loan: &Loan, existing: &[Repayment], amount: Money) -> Result<Admission> {
    let result = check_amount(loan, existing, amount);
    match &result {
        Ok(admission) => debug!(
            loan_id = %loan.id,
            %amount,
            balance_after = %admission.balance_after,
            "repayment amount admissible"
        ),
        Err(err) => warn!(loan_id = %loan.id, %amount, error = %err, "repayment rejected"),
    }
    result
}

fn check_amount(loan: &Loan, existing: &[Repayment], amount: Money) -> Result<Admission> {
    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount { amount });
    }

    let balance = ledger::balance(loan, existing);

    if balance.is_zero() {
        return Err(LedgerError::LoanClosed { loan_id: loan.id });
    }

    if amount > balance {
        return Err(LedgerError::ExceedsBalance {
            balance,
            requested: amount,
        });
    }

    let balance_after = balance - amount;
    Ok(Admission {
        loan_id: loan.id,
        amount,
        balance_before: balance,
        balance_after,
        settles_loan: balance_after.is_zero(),
    })
}

/// full admission: amount checks, then the date rules enabled in `policy`
pub fn admit_repayment(
    loan: &Loan,
    existing: &[Repayment],
    amount: Money,
    payment_date: NaiveDate,
    as_of: NaiveDate,
    policy: &AdmissionPolicy,
) -> Result<Admission> {
    let admission = can_accept(loan, existing, amount)?;

    if policy.reject_before_issue && payment_date < loan.issue_date {
        warn!(loan_id = %loan.id, %payment_date, "repayment dated before issue");
        return Err(LedgerError::PaymentBeforeIssue {
            payment_date,
            issue_date: loan.issue_date,
        });
    }

    if policy.reject_future_dated && payment_date > as_of {
        warn!(loan_id = %loan.id, %payment_date, %as_of, "repayment dated in the future");
        return Err(LedgerError::PaymentInFuture {
            payment_date,
            as_of,
        });
    }

    debug!(loan_id = %loan.id, %amount, %payment_date, "repayment admissible");
    Ok(admission)
}
