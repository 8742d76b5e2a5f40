pub mod customer;
pub mod loan;
pub mod repayment;

pub use customer::{Customer, CustomerBuilder};
pub use loan::{Loan, LoanBuilder};
pub use repayment::Repayment;
