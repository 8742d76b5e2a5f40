//! Portfolio aggregation.
//!
//! Everything here is a fold over [`LoanAccount`]s built from one immutable
//! snapshot and one as-of date. Totals are sums of the per-loan views and
//! every collection used for grouping is ordered, so the same snapshot and
//! date always give the same report.

pub mod exposure;
pub mod monthly;
pub mod overdue;
pub mod overview;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::accounting::LoanAccount;
use crate::model::{Customer, Loan, Repayment};
use crate::types::{CustomerId, LoanId};

pub use exposure::{check_credit_headroom, customer_exposures, CustomerExposure};
pub use monthly::{monthly_series, MonthlyBucket, YearMonth};
pub use overdue::{overdue_groups, CustomerContact, OverdueGroup, OverdueLoan};
pub use overview::{overview, Overview};

/// a loan and the repayments that belong to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub loan: Loan,
    pub repayments: Vec<Repayment>,
}

/// immutable input for one aggregation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub customers: Vec<Customer>,
    pub loans: Vec<LoanRecord>,
}

impl PortfolioSnapshot {
    /// assemble from flat record lists as a data source would return them;
    /// repayments with a non-positive amount or that reference no loan in
    /// the list are dropped
    pub fn from_records(
        customers: Vec<Customer>,
        loans: Vec<Loan>,
        repayments: Vec<Repayment>,
    ) -> Self {
        let mut by_loan: BTreeMap<LoanId, Vec<Repayment>> = BTreeMap::new();
        for repayment in repayments {
            if let Err(err) = repayment.validate() {
                warn!(loan_id = %repayment.loan_id, repayment_id = %repayment.id, error = %err, "dropping invalid repayment");
                continue;
            }
            by_loan.entry(repayment.loan_id).or_default().push(repayment);
        }

        let loans: Vec<LoanRecord> = loans
            .into_iter()
            .map(|loan| LoanRecord {
                repayments: by_loan.remove(&loan.id).unwrap_or_default(),
                loan,
            })
            .collect();

        for (loan_id, orphans) in &by_loan {
            warn!(%loan_id, count = orphans.len(), "dropping repayments for unknown loan");
        }

        Self { customers, loans }
    }

    pub fn record(&self, loan_id: LoanId) -> Option<&LoanRecord> {
        self.loans.iter().find(|r| r.loan.id == loan_id)
    }
}

/// accounts of a snapshot at one as-of date
pub struct Portfolio<'a> {
    as_of: NaiveDate,
    customers: &'a [Customer],
    customer_index: BTreeMap<CustomerId, &'a Customer>,
    accounts: Vec<LoanAccount<'a>>,
}

impl<'a> Portfolio<'a> {
    pub fn new(snapshot: &'a PortfolioSnapshot, as_of: NaiveDate) -> Self {
        let accounts: Vec<LoanAccount<'a>> = snapshot
            .loans
            .iter()
            .map(|record| LoanAccount::new(&record.loan, &record.repayments, as_of))
            .collect();

        let customer_index = snapshot.customers.iter().map(|c| (c.id, c)).collect();

        debug!(%as_of, loans = accounts.len(), "portfolio accounts built");

        Self {
            as_of,
            customers: &snapshot.customers,
            customer_index,
            accounts,
        }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn accounts(&self) -> &[LoanAccount<'a>] {
        &self.accounts
    }

    pub fn account(&self, loan_id: LoanId) -> Option<&LoanAccount<'a>> {
        self.accounts.iter().find(|a| a.loan.id == loan_id)
    }

    pub fn overview(&self) -> Overview {
        overview(&self.accounts)
    }

    pub fn overdue(&self) -> Vec<OverdueGroup> {
        overdue_groups(&self.accounts, &self.customer_index)
    }

    pub fn monthly(&self) -> Vec<MonthlyBucket> {
        monthly_series(&self.accounts)
    }

    pub fn exposures(&self) -> Vec<CustomerExposure> {
        customer_exposures(self.customers, &self.accounts)
    }

    /// the three report shapes in one value
    pub fn report(&self) -> PortfolioReport {
        PortfolioReport {
            as_of: self.as_of,
            overview: self.overview(),
            overdue: self.overdue(),
            monthly: self.monthly(),
        }
    }
}

/// overview, overdue grouping and monthly series at one as-of date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub as_of: NaiveDate,
    pub overview: Overview,
    pub overdue: Vec<OverdueGroup>,
    pub monthly: Vec<MonthlyBucket>,
}

impl PortfolioReport {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
