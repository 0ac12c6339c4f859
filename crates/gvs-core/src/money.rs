//! # Money Module
//!
//! Monetary values in integer cents.
//!
//! ## Why Integer Money?
//! ```text
//!  In floating point:  0.1 + 0.2 = 0.30000000000000004
//!
//!  OUR SOLUTION: integer cents
//!    9.50 EUR is Money::from_cents(950); sums and discounts stay exact,
//!    and any rounding (percentage discounts) is explicit and tested.
//! ```
//!
//! Every monetary value in the system flows through this type: recommended
//! prices, agreed unit prices, line amounts and sale totals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// - **i64 (signed)**: allows negative values for corrections
/// - **Single-field tuple struct**: zero-cost abstraction over i64
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use gvs_core::money::Money;
    ///
    /// let price = Money::from_cents(950); // 9.50
    /// assert_eq!(price.cents(), 950);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (e.g. whole euros).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion, always 0-99.
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is strictly positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a quantity.
    ///
    /// ```rust
    /// use gvs_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(950);
    /// assert_eq!(unit_price.multiply_quantity(5).cents(), 4750);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Applies a whole-percentage discount and returns the discounted amount.
    ///
    /// The discount amount is rounded half-up to the nearest cent before
    /// subtraction, so `amount - discount` never drifts by more than half a
    /// cent from the exact value.
    ///
    /// ```rust
    /// use gvs_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(4750);
    /// assert_eq!(subtotal.apply_discount_pct(10).cents(), 4275);
    /// assert_eq!(subtotal.apply_discount_pct(0).cents(), 4750);
    /// assert_eq!(subtotal.apply_discount_pct(100).cents(), 0);
    /// ```
    pub fn apply_discount_pct(&self, pct: i64) -> Money {
        // i128 guards against overflow on large amounts
        let discount = (self.0 as i128 * pct as i128 + 50) / 100;
        Money(self.0 - discount as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display for debugging and log output. Front-ends format for locale.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing line amounts into a subtotal.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(950);
        assert_eq!(money.cents(), 950);
        assert_eq!(money.major(), 9);
        assert_eq!(money.minor(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
    }

    #[test]
    fn test_sum() {
        let amounts = [100, 250, 4275].map(Money::from_cents);
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 4625);
    }

    #[test]
    fn test_discount_exact() {
        // 47.50 minus 10% = 42.75, exact
        let subtotal = Money::from_cents(4750);
        assert_eq!(subtotal.apply_discount_pct(10).cents(), 4275);
    }

    #[test]
    fn test_discount_rounding() {
        // 0.99 minus 33% = 0.99 - 0.3267 -> discount rounds to 0.33
        let amount = Money::from_cents(99);
        assert_eq!(amount.apply_discount_pct(33).cents(), 66);
    }

    #[test]
    fn test_discount_boundaries() {
        let amount = Money::from_cents(1234);
        assert_eq!(amount.apply_discount_pct(0), amount);
        assert_eq!(amount.apply_discount_pct(100), Money::zero());
    }

    #[test]
    fn test_zero_and_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
        assert_eq!(Money::default(), Money::zero());
    }
}
