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
//! │  The original rental ledgers drifted because every screen recomputed    │
//! │  totals in binary floats with its own rounding.                         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹150.00 = 15000 paise, and 15000 × 2 × 2 is exact.                  │
//! │    Rupee decimals exist only at the API/display boundary.              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rentdesk_core::money::Money;
//!
//! // Create from paise (preferred)
//! let rate = Money::from_paise(15000); // ₹150.00
//!
//! // Arithmetic operations
//! let doubled = rate * 2;                        // ₹300.00
//! let total = rate + Money::from_paise(5000);    // ₹200.00
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in paise (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values (overpaid balances, over-discounted totals)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support; serializes as a bare integer
/// - **Saturating arithmetic**: drafts arrive from lenient form coercion and
///   may carry absurd magnitudes; totals pin at the i64 range instead of
///   wrapping or panicking
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ## Example
    /// ```rust
    /// use rentdesk_core::money::Money;
    ///
    /// let rate = Money::from_paise(15000); // ₹150.00
    /// assert_eq!(rate.paise(), 15000);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Converts a rupee decimal into paise, rounding half away from zero.
    ///
    /// ## Boundary Use Only
    /// This exists for the API/database edge where callers send rupee
    /// decimals (`"rate": 150.0`). All internal arithmetic stays in paise.
    ///
    /// Non-finite input (NaN, infinity) coerces to zero: draft forms are
    /// allowed to contain transient garbage and must not poison totals.
    pub fn from_rupees(rupees: f64) -> Self {
        if !rupees.is_finite() {
            return Money::zero();
        }
        Money((rupees * 100.0).round() as i64)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the value as a rupee decimal, for presentation only.
    #[inline]
    pub fn rupees(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn whole_rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
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

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Multiplies money by a quantity, saturating at the i64 range.
    ///
    /// ## Example
    /// ```rust
    /// use rentdesk_core::money::Money;
    ///
    /// let daily_rate = Money::from_paise(15000); // ₹150.00/day
    /// let line_total = daily_rate.multiply_quantity(2 * 2); // 2 units × 2 days
    /// assert_eq!(line_total.paise(), 60000); // ₹600.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Returns the given percentage of this amount.
    ///
    /// ## Implementation
    /// Integer math with half-up rounding: `(amount * bps + 5000) / 10000`.
    /// Uses i128 internally to prevent overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use rentdesk_core::money::{Money, Percent};
    ///
    /// let price = Money::from_paise(66000);       // ₹660.00
    /// let discount = price.percent_of(Percent::from_percentage(10.0));
    /// assert_eq!(discount.paise(), 6600);          // ₹66.00
    /// ```
    pub fn percent_of(&self, pct: Percent) -> Money {
        let amount = (self.0 as i128 * pct.bps() as i128 + 5000) / 10000;
        Money::from_paise(amount.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }
}

// =============================================================================
// Percent
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1050 bps = 10.5% — fractional percentage discounts stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percent(u32);

impl Percent {
    /// Creates a percentage from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percent(bps)
    }

    /// Creates a percentage from a decimal percentage (for boundary convenience).
    ///
    /// Negative or non-finite input coerces to zero, matching the fail-soft
    /// handling of draft form fields.
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return Percent(0);
        }
        Percent((pct * 100.0).round() as u32)
    }

    /// Returns the value in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the value as a decimal percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }
}

impl Default for Percent {
    fn default() -> Self {
        Percent::zero()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. Invoice rendering formats amounts
/// through the API's rupee-decimal boundary instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}₹{}.{:02}",
            sign,
            self.whole_rupees().abs(),
            self.paise_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

/// Multiplication by integer (for quantity × days calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
