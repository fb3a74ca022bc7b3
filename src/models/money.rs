//! Money type for prices, caps and totals
//!
//! Amounts are integer cents so sums never pick up floating-point error.
//! `Money::unbounded()` is reserved for the default budget's cap.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// A monetary amount stored as cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use pennywise::models::Money;
    /// let price = Money::from_cents(350); // $3.50
    /// assert_eq!(price.to_string(), "$3.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// The cap used by budgets without a spending limit
    pub const fn unbounded() -> Self {
        Self(i64::MAX)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn is_unbounded(&self) -> bool {
        self.0 == i64::MAX
    }

    /// Share of `whole` this amount represents, in percent
    ///
    /// Returns 0 for a zero or unbounded `whole`.
    pub fn percent_of(&self, whole: Money) -> f64 {
        if whole.is_zero() || whole.is_unbounded() {
            return 0.0;
        }
        self.0 as f64 * 100.0 / whole.0 as f64
    }

    /// Parse an amount such as "3.50", "$12", "0.5"
    ///
    /// At most two decimal places are accepted; negative amounts are
    /// rejected because prices and caps are never below zero.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        if body.starts_with('-') {
            return Err(MoneyParseError::Negative(s.to_string()));
        }

        let (whole, fraction) = match body.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (body, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if fraction.len() > 2 || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let dollars: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        // i64::MAX cents is reserved for the unbounded cap
        dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .filter(|total| *total < i64::MAX)
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unbounded() {
            return f.pad("unlimited");
        }
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        // honours width and alignment flags
        f.pad(&format!("{}${}.{:02}", sign, abs / 100, abs % 100))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        if self.is_unbounded() {
            return self;
        }
        Self(self.0.saturating_sub(other.0))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    Negative(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::Negative(s) => write!(f, "Amount cannot be negative: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-250).to_string(), "-$2.50");
        assert_eq!(Money::unbounded().to_string(), "unlimited");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$3").unwrap().cents(), 300);
        assert_eq!(Money::parse("0.5").unwrap().cents(), 50);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            Money::parse("-1.00"),
            Err(MoneyParseError::Negative(_))
        ));
        assert!(Money::parse("1.234").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("").is_err());
        assert!(Money::parse("1.2x").is_err());
    }

    #[test]
    fn test_parse_cannot_reach_unbounded() {
        assert!(matches!(
            Money::parse("92233720368547758.07"),
            Err(MoneyParseError::InvalidFormat(_))
        ));
        let largest = Money::parse("92233720368547758.06").unwrap();
        assert!(!largest.is_unbounded());
    }

    #[test]
    fn test_unbounded_arithmetic() {
        let cap = Money::unbounded();
        assert_eq!(cap - Money::from_cents(500), cap);
        assert_eq!(Money::from_cents(500).percent_of(cap), 0.0);
    }

    #[test]
    fn test_percent_of() {
        let spent = Money::from_cents(4500);
        let cap = Money::from_cents(5000);
        assert!((spent.percent_of(cap) - 90.0).abs() < f64::EPSILON);
        assert_eq!(spent.percent_of(Money::zero()), 0.0);
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_cents(100), Money::from_cents(250)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 350);
    }
}
