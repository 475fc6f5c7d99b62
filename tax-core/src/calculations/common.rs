//! Common utility functions for tax calculations.
//!
//! Every stage of the pipeline that rounds does so to whole rupees through
//! [`round_to_rupee`], so the rounding points stay in one place.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to the nearest whole rupee, halves away from zero.
///
/// Amounts flowing through the pipeline are never negative, so this behaves
/// as round-half-up on every value the engine produces.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_to_rupee;
///
/// assert_eq!(round_to_rupee(dec!(3749.4)), dec!(3749));
/// assert_eq!(round_to_rupee(dec!(3749.5)), dec!(3750));
/// assert_eq!(round_to_rupee(dec!(-0.5)), dec!(-1)); // Away from zero
/// ```
pub fn round_to_rupee(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100), dec!(200)), dec!(200));
/// assert_eq!(max(dec!(-100), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Applies a whole-number percentage to an amount without rounding.
///
/// The fraction is formed first so amounts near [`Decimal::MAX`] do not
/// overflow for percentages up to 100.
pub fn percent_of(
    amount: Decimal,
    percentage: u32,
) -> Decimal {
    amount * (Decimal::from(percentage) / Decimal::ONE_HUNDRED)
}
