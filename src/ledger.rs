//! Repayment ledger: a loan's outstanding balance from its principal and
//! repayments.
//!
//! All sums are integer minor units, so repayment order never changes a
//! result and a loan repaid in many small amounts lands on exactly zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::decimal::Money;
use crate::model::{Loan, Repayment};
use crate::types::RepaymentId;

/// sum of repayment amounts
pub fn total_repaid(repayments: &[Repayment]) -> Money {
    repayments.iter().map(|r| r.amount).sum()
}

/// outstanding balance, `max(0, principal - repaid)`, never above principal
pub fn balance(loan: &Loan, repayments: &[Repayment]) -> Money {
    let repaid = total_repaid(repayments);

    if repaid > loan.principal {
        warn!(
            loan_id = %loan.id,
            principal = %loan.principal,
            repaid = %repaid,
            "repayments exceed principal, flooring balance at zero"
        );
    }

    (loan.principal - repaid).clamp(Money::ZERO, loan.principal)
}

/// amount of principal already covered, `principal - balance`
pub fn collected(loan: &Loan, repayments: &[Repayment]) -> Money {
    loan.principal - balance(loan, repayments)
}

/// repayments ordered by payment date; same-day entries keep input order
fn chronological(repayments: &[Repayment]) -> Vec<&Repayment> {
    let mut ordered: Vec<&Repayment> = repayments.iter().collect();
    ordered.sort_by_key(|r| r.payment_date);
    ordered
}

/// date of the repayment at which the running total first covers principal
pub fn settlement_date(loan: &Loan, repayments: &[Repayment]) -> Option<NaiveDate> {
    let mut running = Money::ZERO;
    for repayment in chronological(repayments) {
        running += repayment.amount;
        if running >= loan.principal {
            return Some(repayment.payment_date);
        }
    }
    None
}

/// one line of a loan statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementLine {
    pub repayment_id: RepaymentId,
    pub payment_date: NaiveDate,
    pub amount: Money,
    pub balance_after: Money,
}

/// running balance after each repayment, oldest first
pub fn statement(loan: &Loan, repayments: &[Repayment]) -> Vec<StatementLine> {
    let mut running = Money::ZERO;
    chronological(repayments)
        .into_iter()
        .map(|repayment| {
            running += repayment.amount;
            StatementLine {
                repayment_id: repayment.id,
                payment_date: repayment.payment_date,
                amount: repayment.amount,
                balance_after: (loan.principal - running).clamp(Money::ZERO, loan.principal),
            }
        })
        .collect()
}
