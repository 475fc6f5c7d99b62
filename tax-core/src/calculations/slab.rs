//! Progressive slab tax and the marginal relief that smooths the 87A cliff.

use rust_decimal::Decimal;

use crate::RegimeConfig;
use crate::TaxBracket;
use crate::calculations::common::{max, round_to_rupee};

/// Tax on `income` across the progressive `brackets`.
///
/// Each bracket taxes the slice of income above its lower bound and up to its
/// upper bound. Slices are summed unrounded and the total is rounded once.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::RegimeConfig;
/// use tax_core::calculations::slab_tax;
///
/// let brackets = &RegimeConfig::builtin().brackets;
///
/// assert_eq!(slab_tax(brackets, dec!(800000)), dec!(20000));
/// assert_eq!(slab_tax(brackets, dec!(1425000)), dec!(93750));
/// ```
pub fn slab_tax(
    brackets: &[TaxBracket],
    income: Decimal,
) -> Decimal {
    let tax: Decimal = brackets
        .iter()
        .map(|b| b.taxable_slice(income) * b.tax_rate)
        .sum();

    round_to_rupee(tax)
}

/// Relief for income just above the rebate limit.
///
/// Inside `(rebate_income_limit, marginal_relief_upper_limit]` the tax may not
/// exceed the income earned above the rebate limit. Returns the amount to
/// subtract from `tax`; zero outside the band.
pub fn marginal_relief(
    config: &RegimeConfig,
    total_income: Decimal,
    tax: Decimal,
) -> Decimal {
    if total_income <= config.rebate_income_limit
        || total_income > config.marginal_relief_upper_limit
    {
        return Decimal::ZERO;
    }

    let excess_income = total_income - config.rebate_income_limit;
    max(tax - excess_income, Decimal::ZERO)
}
