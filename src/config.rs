use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};

/// ledger-wide defaults and admission policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// due date offset used when a loan is issued without one
    pub default_term_days: u32,
    pub default_grace_period_days: u32,
    pub default_credit_limit: Money,
    pub default_trust_score: u8,
    pub admission: AdmissionPolicy,
}

/// optional repayment and loan admission rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionPolicy {
    /// reject repayments dated before the loan was issued
    pub reject_before_issue: bool,
    /// reject repayments dated after the as-of date
    pub reject_future_dated: bool,
    /// reject new loans that would push a customer past their credit limit
    pub enforce_credit_limit: bool,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self {
            reject_before_issue: true,
            reject_future_dated: true,
            enforce_credit_limit: false,
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_term_days: 30,
            default_grace_period_days: 7,
            default_credit_limit: Money::from_major(5_000),
            default_trust_score: 5,
            admission: AdmissionPolicy::default(),
        }
    }
}

impl LedgerConfig {
    /// parse from json, filling omitted fields with defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LedgerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=10).contains(&self.default_trust_score) {
            return Err(LedgerError::InvalidCustomer {
                message: format!(
                    "default trust score must be between 1 and 10, got {}",
                    self.default_trust_score
                ),
            });
        }

        if self.default_credit_limit.is_negative() {
            return Err(LedgerError::InvalidCustomer {
                message: "default credit limit cannot be negative".to_string(),
            });
        }

        Ok(())
    }

    /// permissive policy for importing historical records
    pub fn permissive() -> Self {
        Self {
            admission: AdmissionPolicy {
                reject_before_issue: false,
                reject_future_dated: false,
                enforce_credit_limit: false,
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_form_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.default_term_days, 30);
        assert_eq!(config.default_grace_period_days, 7);
        assert_eq!(config.default_credit_limit, Money::from_major(5_000));
        assert_eq!(config.default_trust_score, 5);
        assert!(config.admission.reject_before_issue);
        assert!(!config.admission.enforce_credit_limit);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = LedgerConfig::from_json_str(
            r#"{ "default_grace_period_days": 3, "admission": { "enforce_credit_limit": true } }"#,
        )
        .unwrap();

        assert_eq!(config.default_grace_period_days, 3);
        assert_eq!(config.default_term_days, 30);
        assert!(config.admission.enforce_credit_limit);
        assert!(config.admission.reject_future_dated);
    }

    #[test]
    fn test_invalid_trust_score_rejected() {
        let err = LedgerConfig::from_json_str(r#"{ "default_trust_score": 11 }"#).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidCustomer { .. }));

        let err = LedgerConfig::from_json_str(r#"{ "default_credit_limit": "-1" }"#).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidCustomer { .. }));
    }
}
