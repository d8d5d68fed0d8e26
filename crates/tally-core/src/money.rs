//! # Money Module
//!
//! Provides the `Amount` type for monetary figures in a sales tally.
//!
//! ## Why a Float?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  INPUT SHAPE                                                            │
//! │                                                                         │
//! │  Catalogue prices arrive as JSON numbers:   28.1, 3.99, 155.0          │
//! │  Ledger quantities may be fractional:       1.5 (kg), -2 (return)      │
//! │                                                                         │
//! │  A fractional quantity times a price has no exact cent value, so       │
//! │  amounts stay in f64 and rounding happens ONLY at display time.        │
//! │  Totals are compared with a tolerance (AMOUNT_EPSILON).                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Amount;
//!
//! let price = Amount::new(10.0);
//! let line = price.multiply_quantity(-2.0);     // return of two units
//! let total = Amount::new(50.0) + line;
//! assert_eq!(total.to_string(), "30.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::AMOUNT_EPSILON;

// =============================================================================
// Amount Type
// =============================================================================

/// A currency-agnostic monetary value.
///
/// ## Design Decisions
/// - **f64 (signed)**: negative line costs model returns and adjustments
/// - **Single field tuple struct**: zero-cost wrapper that keeps prices,
///   line costs and totals from being mixed up with raw quantities
/// - **No currency symbol**: the report prints plain grouped numbers
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// Creates an amount from a plain number.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Amount(value)
    }

    /// Returns zero.
    #[inline]
    pub const fn zero() -> Self {
        Amount(0.0)
    }

    /// Returns the raw value.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Checks if the value is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Multiplies a unit price by a (possibly negative or fractional) quantity.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Amount;
    ///
    /// let unit_price = Amount::new(2.5);
    /// assert_eq!(unit_price.multiply_quantity(4.0).value(), 10.0);
    /// assert_eq!(unit_price.multiply_quantity(-2.0).value(), -5.0);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: f64) -> Self {
        Amount(self.0 * qty)
    }

    /// Compares two amounts within [`AMOUNT_EPSILON`], scaled by magnitude.
    pub fn approx_eq(&self, other: Amount) -> bool {
        let scale = self.0.abs().max(other.0.abs()).max(1.0);
        (self.0 - other.0).abs() <= AMOUNT_EPSILON * scale
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display with two decimals and comma thousands grouping: `12,345.68`.
///
/// A value that rounds to zero is printed without a sign.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fixed = format!("{:.2}", self.0.abs());
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let negative = self.0 < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
        let sign = if negative { "-" } else { "" };
        write!(f, "{}{}.{}", sign, grouped, frac_part)
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::zero()
    }
}

impl Add for Amount {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Amount(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Amount::new(0.0).to_string(), "0.00");
        assert_eq!(Amount::new(5.0).to_string(), "5.00");
        assert_eq!(Amount::new(1099.5).to_string(), "1,099.50");
        assert_eq!(Amount::new(2481.86).to_string(), "2,481.86");
        assert_eq!(Amount::new(1234567.891).to_string(), "1,234,567.89");
        assert_eq!(Amount::new(-550.0).to_string(), "-550.00");
        assert_eq!(Amount::new(-1000.0).to_string(), "-1,000.00");
    }

    #[test]
    fn test_display_negative_rounding_to_zero_has_no_sign() {
        assert_eq!(Amount::new(-0.001).to_string(), "0.00");
        assert_eq!(Amount::new(-0.0).to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Amount::new(10.0);
        let b = Amount::new(4.0);

        assert_eq!((a + b).value(), 14.0);
        assert_eq!(a.multiply_quantity(3.0).value(), 30.0);

        let mut acc = Amount::zero();
        acc += a;
        acc += b;
        assert_eq!(acc.value(), 14.0);
    }

    #[test]
    fn test_sum() {
        let lines = vec![Amount::new(1.5), Amount::new(2.5), Amount::new(-1.0)];
        let total: Amount = lines.iter().sum();
        assert_eq!(total.value(), 3.0);

        let empty: Vec<Amount> = Vec::new();
        assert!(empty.into_iter().sum::<Amount>().is_zero());
    }

    #[test]
    fn test_approx_eq() {
        let a = Amount::new(0.1) + Amount::new(0.2);
        assert!(a.approx_eq(Amount::new(0.3)));
        assert!(!a.approx_eq(Amount::new(0.31)));
        assert!(Amount::new(1e9 + 1e-4).approx_eq(Amount::new(1e9)));
    }

    #[test]
    fn test_default_is_zero() {
        assert!(Amount::default().is_zero());
        assert!(!Amount::new(-1.0).is_zero());
    }
}
