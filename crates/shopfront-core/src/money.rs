//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  An order total of 3 × 0.10 would not compare equal to 0.30            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Catalog prices are stored as DECIMAL(18,2) values scaled by 100,    │
//! │    so 1200.00 becomes 120000 cents and every sum is exact.             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::money::Money;
//!
//! let price = Money::from_cents(80000); // 800.00
//! let line = price * 2;                 // 1600.00
//! let total = line + Money::from_cents(15000);
//! assert_eq!(total.cents(), 175000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: differences between totals may be negative
/// - **Single field tuple struct**: zero-cost wrapper over i64
/// - **Serialized as a bare integer**: the API exposes `*_cents` fields
///
/// ## Where Money Flows
/// ```text
/// Product.price_cents ──► OrderItem.unit_price_cents (snapshot)
///                                   │
///                                   ▼
///                      unit_price × quantity = line total
///                                   │
///                                   ▼
///                      Σ line totals = Order.total_cents
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let price = Money::from_cents(120000); // 1200.00
    /// assert_eq!(price.cents(), 120000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let price = Money::from_major_minor(1200, 0);
    /// assert_eq!(price.cents(), 120000);
    ///
    /// let negative = Money::from_major_minor(-5, 50);
    /// assert_eq!(negative.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
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

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(15000); // 150.00
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert_eq!(line_total.cents(), 30000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Shows the amount with two fraction digits, e.g. `1200.00`.
///
/// ## Note
/// No currency symbol: the catalog does not carry a currency.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
