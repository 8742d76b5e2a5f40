use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::LedgerConfig;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::types::{CustomerId, TrustBand};

/// a shop customer; owns loans by reference from the loan side
///
/// There is no outstanding total stored here. Use
/// [`crate::portfolio::customer_exposures`] to derive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    /// maximum total outstanding the shopkeeper wants to extend
    pub credit_limit: Money,
    /// advisory rating, 1 to 10
    pub trust_score: u8,
}

impl Customer {
    pub fn builder() -> CustomerBuilder {
        CustomerBuilder::new()
    }

    pub fn trust_band(&self) -> TrustBand {
        TrustBand::from_score(self.trust_score)
    }

    pub fn validate(&self) -> Result<()> {
        validate_customer(&self.name, self.credit_limit, self.trust_score)
    }
}

fn validate_customer(name: &str, credit_limit: Money, trust_score: u8) -> Result<()> {
    if name.trim().is_empty() {
        return Err(LedgerError::InvalidCustomer {
            message: "name required".to_string(),
        });
    }

    if credit_limit.is_negative() {
        return Err(LedgerError::InvalidCustomer {
            message: format!("credit limit cannot be negative, got {}", credit_limit),
        });
    }

    if !(1..=10).contains(&trust_score) {
        return Err(LedgerError::InvalidCustomer {
            message: format!("trust score must be between 1 and 10, got {}", trust_score),
        });
    }

    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// builder for customers
#[derive(Debug, Default)]
pub struct CustomerBuilder {
    id: Option<CustomerId>,
    name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
    notes: Option<String>,
    credit_limit: Option<Money>,
    trust_score: Option<u8>,
}

impl CustomerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: CustomerId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn credit_limit(mut self, limit: Money) -> Self {
        self.credit_limit = Some(limit);
        self
    }

    pub fn trust_score(mut self, score: u8) -> Self {
        self.trust_score = Some(score);
        self
    }

    pub fn build(self) -> Result<Customer> {
        self.build_with_config(&LedgerConfig::default())
    }

    pub fn build_with_config(self, config: &LedgerConfig) -> Result<Customer> {
        let name = self.name.unwrap_or_default().trim().to_string();
        let credit_limit = self.credit_limit.unwrap_or(config.default_credit_limit);
        let trust_score = self.trust_score.unwrap_or(config.default_trust_score);

        validate_customer(&name, credit_limit, trust_score)?;

        Ok(Customer {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            name,
            phone: non_blank(self.phone),
            email: non_blank(self.email),
            address: non_blank(self.address),
            notes: non_blank(self.notes),
            credit_limit,
            trust_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_defaults() {
        let customer = Customer::builder()
            .name("  Asha Traders ")
            .phone("9876543210")
            .email("")
            .build()
            .unwrap();

        assert_eq!(customer.name, "Asha Traders");
        assert_eq!(customer.credit_limit, Money::from_major(5_000));
        assert_eq!(customer.trust_score, 5);
        assert_eq!(customer.trust_band(), TrustBand::Medium);
        assert_eq!(customer.email, None);
    }

    #[test]
    fn test_customer_validation() {
        assert!(Customer::builder().name(" ").build().is_err());
        assert!(Customer::builder().name("Ravi").trust_score(0).build().is_err());
        assert!(Customer::builder().name("Ravi").trust_score(11).build().is_err());
        assert!(Customer::builder()
            .name("Ravi")
            .credit_limit(Money::from_major(-1))
            .build()
            .is_err());
        assert!(Customer::builder()
            .name("Ravi")
            .credit_limit(Money::ZERO)
            .trust_score(10)
            .build()
            .is_ok());
    }
}
