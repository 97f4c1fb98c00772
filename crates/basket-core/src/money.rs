//! # Money Module
//!
//! Provides the `Money` type for handling monetary values exactly.
//!
//! ## Working Precision
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EVERY ARITHMETIC RESULT IS ROUNDED                                     │
//! │                                                                         │
//! │  Precision:  3 significant digits                                       │
//! │  Rounding:   away from zero ("round up") on any non-exact result        │
//! │                                                                         │
//! │    5.67 / 100        = 0.0567            (exact, kept)                  │
//! │    0.0567 × 25       = 1.4175  → 1.42                                   │
//! │    0.0567 × 35       = 1.9845  → 1.99   (NOT 1.98: round up, not half)  │
//! │    3.78 − 0.945      = 2.835   → 2.84                                   │
//! │                                                                         │
//! │  Constructing Money from a decimal does NOT round. Only operations do.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The rounding applies to each step, so chained operations are reproducible
//! bit-for-bit: `(a / 100) × p` is two rounded steps, never one.
//!
//! Multiplication, addition and subtraction are checked: a result outside
//! `Decimal`'s range yields `None` instead of panicking, and callers turn that into
//! [`CoreError::Overflow`](crate::error::CoreError::Overflow).
//!
//! ## Usage
//! ```rust
//! use basket_core::money::Money;
//! use rust_decimal_macros::dec;
//!
//! let price = Money::new(dec!(1.89));
//! let sub_total = price.checked_mul(3).unwrap();          // 5.67
//! let discount = sub_total
//!     .divided_by(dec!(100))
//!     .checked_times(dec!(25))
//!     .unwrap();                                          // 1.4175 → 1.42
//!
//! assert_eq!(sub_total.amount(), dec!(5.67));
//! assert_eq!(discount.amount(), dec!(1.42));
//! assert_eq!(sub_total.checked_sub(discount).unwrap().amount(), dec!(4.25));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Significant digits kept by every arithmetic operation on [`Money`].
pub const WORKING_PRECISION: u32 = 3;

/// Rounds a raw arithmetic result to the working precision.
fn round_working(value: Decimal) -> Decimal {
    value
        .round_sf_with_strategy(WORKING_PRECISION, RoundingStrategy::AwayFromZero)
        .unwrap_or(value)
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount backed by an exact decimal.
///
/// ## Design Decisions
/// - **Decimal, not cents**: offers divide by 100 and multiply by arbitrary
///   percentages; a fixed minor unit would round too early
/// - **Copy**: `Decimal` is 16 bytes, passing by value is cheap
/// - **Transparent serde**: serializes as the bare decimal
///
/// ## Where Money is Used
/// ```text
/// Variant.price / Product.price ──► LineItem.unit_price ──► LineItem.sub_total
///                                                               │
///                           offers ──► LineItem.discount ◄──────┘
///                                             │
///                                             ▼
///                     LineItem.total ──► PricedBasket totals ──► formatter
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from a decimal amount, unrounded.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiplies by a decimal factor, rounding to the working precision.
    ///
    /// Returns `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    /// use rust_decimal::Decimal;
    /// use rust_decimal_macros::dec;
    ///
    /// let base = Money::new(dec!(0.0378));
    /// assert_eq!(base.checked_times(dec!(25)).unwrap().amount(), dec!(0.945));
    /// assert!(Money::new(Decimal::MAX).checked_times(dec!(2)).is_none());
    /// ```
    pub fn checked_times(self, factor: Decimal) -> Option<Money> {
        self.0.checked_mul(factor).map(|v| Money(round_working(v)))
    }

    /// Multiplies by a quantity, rounding to the working precision.
    pub fn checked_mul(self, quantity: i64) -> Option<Money> {
        self.checked_times(Decimal::from(quantity))
    }

    /// Adds two amounts, rounding to the working precision.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(|v| Money(round_working(v)))
    }

    /// Subtracts `other`, rounding to the working precision.
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(|v| Money(round_working(v)))
    }

    /// Left fold from zero, rounding after every addition.
    ///
    /// Returns `None` as soon as a partial sum overflows.
    pub fn checked_sum<I>(amounts: I) -> Option<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(), Money::checked_add)
    }

    /// Divides by a non-zero decimal, rounding to the working precision.
    ///
    /// A zero divisor yields zero rather than panicking.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let ten = Money::new(dec!(10));
    /// assert_eq!(ten.divided_by(dec!(3)).amount(), dec!(3.34));
    /// ```
    pub fn divided_by(self, divisor: Decimal) -> Money {
        match self.0.checked_div(divisor) {
            Some(quotient) => Money(round_working(quotient)),
            None => Money::zero(),
        }
    }

    /// Returns the larger of two amounts, preferring `self` on ties.
    #[inline]
    pub fn max_of(self, other: Money) -> Money {
        if other > self {
            other
        } else {
            self
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the raw decimal amount.
///
/// ## Note
/// This is for debugging and logs. Use [`crate::format::format_money`] for
/// currency-aware output.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
