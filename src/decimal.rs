use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use crate::errors::{LedgerError, Result};

/// number of minor units (paise, cents) per major unit
pub const MINOR_SCALE: u32 = 2;
const MINOR_PER_MAJOR: i64 = 100;

/// Money held as integer minor units so that long runs of small repayments
/// add up exactly
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// create from integer amount (rupees, dollars)
    pub fn from_major(amount: i64) -> Self {
        Money(amount.saturating_mul(MINOR_PER_MAJOR))
    }

    /// create from minor amount (paise, cents)
    pub fn from_minor(amount: i64) -> Self {
        Money(amount)
    }

    /// create from decimal, refusing anything finer than one minor unit
    pub fn from_decimal(d: Decimal) -> Result<Self> {
        let normalized = d.normalize();
        if normalized.scale() > MINOR_SCALE {
            return Err(LedgerError::InvalidMoney {
                value: d.to_string(),
            });
        }

        let mut scaled = normalized;
        scaled.rescale(MINOR_SCALE);
        i64::try_from(scaled.mantissa())
            .map(Money)
            .map_err(|_| LedgerError::InvalidMoney {
                value: d.to_string(),
            })
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self> {
        let d = Decimal::from_str(s.trim()).map_err(|_| LedgerError::InvalidMoney {
            value: s.to_string(),
        })?;
        Self::from_decimal(d)
    }

    /// amount in minor units
    pub fn minor(&self) -> i64 {
        self.0
    }

    /// get as decimal with two fractional digits
    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(self.0, MINOR_SCALE)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// clamp into `[low, high]`; `high` wins if the bounds cross
    pub fn clamp(self, low: Self, high: Self) -> Self {
        self.max(low).min(high)
    }

    /// `100 * self / whole`, rounded to 2 dp; zero when `whole` is zero
    pub fn percent_of(&self, whole: Money) -> Decimal {
        if whole.is_zero() {
            return Decimal::ZERO;
        }
        (Decimal::from(self.0) * Decimal::ONE_HUNDRED / Decimal::from(whole.0)).round_dp(2)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_decimal())
    }
}

impl FromStr for Money {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        Money::from_str_exact(s)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = LedgerError;

    fn try_from(d: Decimal) -> Result<Self> {
        Money::from_decimal(d)
    }
}

impl From<Money> for Decimal {
    fn from(m: Money) -> Self {
        m.as_decimal()
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Money::from_major(i as i64)
    }
}

impl From<u32> for Money {
    fn from(i: u32) -> Self {
        Money::from_major(i as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

/// annual interest rate as a fraction (0.12 is 12%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from decimal (e.g., 0.05 for 5%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from whole percentage (e.g., 5 for 5%)
    pub fn from_percentage(p: u32) -> Self {
        Rate(Decimal::from(p) / Decimal::ONE_HUNDRED)
    }

    /// create from a fractional percentage (e.g., 2.5 for 2.5%)
    pub fn from_decimal_percent(p: Decimal) -> Self {
        Rate(p / Decimal::ONE_HUNDRED)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_decimal(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_small_payments_sum_exactly() {
        // 0.10 a thousand times would drift in f64
        let total: Money = std::iter::repeat(Money::from_minor(10)).take(1_000).sum();
        assert_eq!(total, Money::from_major(100));
        assert_eq!(Money::from_major(100) - total, Money::ZERO);
    }

    #[test]
    fn test_decimal_conversion_is_strict() {
        assert_eq!(Money::from_decimal(dec!(12.5)).unwrap(), Money::from_minor(1_250));
        assert_eq!(Money::from_decimal(dec!(12.500)).unwrap(), Money::from_minor(1_250));
        assert!(matches!(
            Money::from_decimal(dec!(0.005)),
            Err(LedgerError::InvalidMoney { .. })
        ));
    }

    #[test]
    fn test_parse_and_display() {
        let m: Money = "1000.5".parse().unwrap();
        assert_eq!(m.to_string(), "1000.50");
        assert!("ten".parse::<Money>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Money::from_minor(60_000)).unwrap();
        assert_eq!(json, "\"600.00\"");

        let back: Money = serde_json::from_str("\"600\"").unwrap();
        assert_eq!(back, Money::from_major(600));
        assert!(serde_json::from_str::<Money>("\"1.001\"").is_err());
    }

    #[test]
    fn test_percent_of() {
        let paid = Money::from_major(400);
        assert_eq!(paid.percent_of(Money::from_major(1_000)), dec!(40));
        assert_eq!(Money::from_major(1).percent_of(Money::from_major(3)), dec!(33.33));
        assert_eq!(paid.percent_of(Money::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_rate_percentages() {
        assert_eq!(Rate::from_percentage(12).as_decimal(), dec!(0.12));
        assert_eq!(Rate::from_decimal_percent(dec!(2.5)).as_decimal(), dec!(0.025));
        assert!(Rate::from_decimal(dec!(-0.01)).is_negative());
        assert!(!Rate::ZERO.is_negative());
        assert_eq!(Rate::from_percentage(12).to_string(), "12%");
    }
}
