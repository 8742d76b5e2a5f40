pub mod accounting;
pub mod book;
pub mod clock;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod model;
pub mod portfolio;
pub mod status;
pub mod types;

// re-export key types
pub use accounting::{admit_repayment, can_accept, Admission, LoanAccount, LoanView};
pub use book::{BookState, LoanBook};
pub use config::{AdmissionPolicy, LedgerConfig};
pub use decimal::{Money, Rate};
pub use errors::{LedgerError, RejectionKind, Result};
pub use events::{Event, EventStore};
pub use ledger::StatementLine;
pub use model::{Customer, CustomerBuilder, Loan, LoanBuilder, Repayment};
pub use portfolio::{
    CustomerExposure, MonthlyBucket, OverdueGroup, OverdueLoan, Overview, Portfolio,
    PortfolioReport, PortfolioSnapshot, YearMonth,
};
pub use types::{CustomerId, LoanId, LoanStatus, RepaymentId, TrustBand};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
