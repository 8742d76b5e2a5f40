use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::accounting::LoanAccount;
use crate::decimal::Money;
use crate::errors::LedgerError;

/// calendar month, serialized as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl From<YearMonth> for String {
    fn from(ym: YearMonth) -> Self {
        ym.to_string()
    }
}

impl TryFrom<String> for YearMonth {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d")
            .map(YearMonth::from_date)
            .map_err(|_| LedgerError::InvalidMonth { value })
    }
}

/// activity within one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    pub month: YearMonth,
    /// principal issued this month
    pub loaned: Money,
    /// repayments received this month
    pub collected: Money,
    pub new_loans: usize,
    /// loans whose settling repayment fell in this month
    pub completed_loans: usize,
}

impl MonthlyBucket {
    fn empty(month: YearMonth) -> Self {
        Self {
            month,
            loaned: Money::ZERO,
            collected: Money::ZERO,
            new_loans: 0,
            completed_loans: 0,
        }
    }
}

fn bucket_for(
    buckets: &mut BTreeMap<YearMonth, MonthlyBucket>,
    date: NaiveDate,
) -> &mut MonthlyBucket {
    let month = YearMonth::from_date(date);
    buckets
        .entry(month)
        .or_insert_with(|| MonthlyBucket::empty(month))
}

/// contiguous month-by-month activity, oldest first, spanning every issue
/// and payment date in the accounts
pub fn monthly_series(accounts: &[LoanAccount<'_>]) -> Vec<MonthlyBucket> {
    let mut buckets: BTreeMap<YearMonth, MonthlyBucket> = BTreeMap::new();

    for account in accounts {
        let issued = bucket_for(&mut buckets, account.loan.issue_date);
        issued.new_loans += 1;
        issued.loaned += account.loan.principal;

        for repayment in account.repayments {
            bucket_for(&mut buckets, repayment.payment_date).collected += repayment.amount;
        }

        if let Some(settled) = account.settled_on {
            bucket_for(&mut buckets, settled).completed_loans += 1;
        }
    }

    let (first, last) = match (buckets.keys().next(), buckets.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };

    let mut series = Vec::new();
    let mut month = first;
    while month <= last {
        series.push(
            buckets
                .remove(&month)
                .unwrap_or_else(|| MonthlyBucket::empty(month)),
        );
        month = month.next();
    }
    series
}
