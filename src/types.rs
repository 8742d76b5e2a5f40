use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a customer
pub type CustomerId = Uuid;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// unique identifier for a repayment
pub type RepaymentId = Uuid;

/// derived loan lifecycle status, never stored on the loan record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    /// nothing repaid yet, deadline not passed
    Pending,
    /// partly repaid, deadline not passed
    Partial,
    /// balance remaining after due date plus grace period
    Overdue,
    /// balance is zero
    Paid,
}

impl LoanStatus {
    /// every status except paid still carries a balance
    pub fn is_open(&self) -> bool {
        !matches!(self, LoanStatus::Paid)
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "Pending",
            LoanStatus::Partial => "Partially Paid",
            LoanStatus::Overdue => "Overdue",
            LoanStatus::Paid => "Paid",
        }
    }
}

/// coarse band of the advisory 1-10 trust score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustBand {
    High,
    Medium,
    Low,
}

impl TrustBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            7..=u8::MAX => TrustBand::High,
            4..=6 => TrustBand::Medium,
            _ => TrustBand::Low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&LoanStatus::Overdue).unwrap();
        assert_eq!(json, "\"overdue\"");
        let back: LoanStatus = serde_json::from_str("\"partial\"").unwrap();
        assert_eq!(back, LoanStatus::Partial);
    }

    #[test]
    fn test_trust_bands() {
        assert_eq!(TrustBand::from_score(10), TrustBand::High);
        assert_eq!(TrustBand::from_score(7), TrustBand::High);
        assert_eq!(TrustBand::from_score(6), TrustBand::Medium);
        assert_eq!(TrustBand::from_score(4), TrustBand::Medium);
        assert_eq!(TrustBand::from_score(3), TrustBand::Low);
    }
}
