//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A commission report sums thousands of sale rows and then multiplies   │
//! │  by a percentage; float error compounds at every step.                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Amounts, per-head rates and commissions are all i64 cents.          │
//! │    Percentage and exchange-rate application round once, explicitly.    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//! use tally_core::types::{ExchangeRate, RatePercent};
//!
//! // 500,000.00 in TMT sales at the 7% tier
//! let amount = Money::from_cents(50_000_000);
//! let commission = amount.apply_rate(RatePercent::from_percent(7));
//! assert_eq!(commission.cents(), 3_500_000); // 35,000.00
//!
//! // 0.50 USD per head × 129 heads, converted at ×4.7
//! let usd = Money::from_cents(50) * 129i32;
//! let base = usd.convert(ExchangeRate::USD_TO_MYR);
//! assert_eq!(base.cents(), 30_315); // 303.15
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::{ExchangeRate, RatePercent};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for corrections and refunds
///   flowing in from upstream data entry
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Currency-agnostic**: The engine handles both USD (per-head rates)
///   and the report base currency; which one a value is in is tracked by
///   the field it lives in, not by this type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let amount = Money::from_cents(1099); // 10.99
    /// assert_eq!(amount.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -5.50, not -4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major_units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_units(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a percentage rate, rounding half up.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`
    /// The +5000 provides rounding (5000/10000 = 0.5), and the i128
    /// intermediate prevents overflow on large monthly amount sums.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::types::RatePercent;
    ///
    /// let amount = Money::from_cents(50_000_000); // 500,000.00
    /// let rate = RatePercent::from_percent(7);
    ///
    /// // 500,000.00 × 7% = 35,000.00
    /// assert_eq!(amount.apply_rate(rate).cents(), 3_500_000);
    /// ```
    pub fn apply_rate(&self, rate: RatePercent) -> Money {
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Converts between currencies using a basis-point multiplier.
    ///
    /// Same rounding scheme as [`Money::apply_rate`]: half up, i128
    /// intermediate.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::types::ExchangeRate;
    ///
    /// let usd = Money::from_cents(6450); // 64.50 USD
    /// let myr = usd.convert(ExchangeRate::USD_TO_MYR);
    /// assert_eq!(myr.cents(), 30_315); // 303.15 MYR
    /// ```
    pub fn convert(&self, rate: ExchangeRate) -> Money {
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// No currency symbol: the engine handles both USD and the report base
/// currency. The report layer owns symbols and localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02}",
            sign,
            self.major_units().abs(),
            self.minor_units()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (per-head rate × unique customer count).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, count: i32) -> Self {
        Money(self.0 * count as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, count: i64) -> Self {
        Money(self.0 * count)
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
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major_units(), 10);
        assert_eq!(money.minor_units(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.cents(), 1099);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.cents(), -550);
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
        assert_eq!((a * 3i32).cents(), 3000);
        let result: Money = a * 3i64;
        assert_eq!(result.cents(), 3000);
    }

    #[test]
    fn test_apply_rate_whole_percent() {
        // 500,000.00 at 7% = 35,000.00 - the reference scenario
        let amount = Money::from_cents(50_000_000);
        let rate = RatePercent::from_percent(7);
        assert_eq!(amount.apply_rate(rate).cents(), 3_500_000);
    }

    #[test]
    fn test_apply_rate_rounds_half_up() {
        // 0.75 at 10% = 0.075 → rounds to 0.08
        let amount = Money::from_cents(75);
        let rate = RatePercent::from_percent(10);
        assert_eq!(amount.apply_rate(rate).cents(), 8);

        // 0.74 at 10% = 0.074 → rounds to 0.07
        let amount = Money::from_cents(74);
        assert_eq!(amount.apply_rate(rate).cents(), 7);
    }

    #[test]
    fn test_apply_rate_zero_and_negative_amounts() {
        // Upstream data entry allows zero and negative rows; they flow
        // through the rate math unchanged in sign.
        let rate = RatePercent::from_percent(10);
        assert_eq!(Money::zero().apply_rate(rate).cents(), 0);
        assert_eq!(Money::from_cents(-1000).apply_rate(rate).cents(), -99);
    }

    #[test]
    fn test_convert_reference_rate() {
        // 64.50 USD × 4.7 = 303.15
        let usd = Money::from_cents(6450);
        assert_eq!(usd.convert(ExchangeRate::USD_TO_MYR).cents(), 30_315);
    }

    #[test]
    fn test_convert_identity() {
        let usd = Money::from_cents(1234);
        assert_eq!(usd.convert(ExchangeRate::IDENTITY).cents(), 1234);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_cents(100);
        assert!(positive.is_positive());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
    }

    /// Large monthly amount sums must not overflow the intermediate.
    #[test]
    fn test_apply_rate_large_amounts() {
        let amount = Money::from_cents(i64::MAX / 2);
        let rate = RatePercent::from_percent(10);
        // One tenth of the input, no panic.
        assert_eq!(amount.apply_rate(rate).cents(), (i64::MAX / 2) / 10);
    }
}
