//! Surcharge on high incomes, including its own marginal relief.
//!
//! Crossing a surcharge threshold may not raise tax plus surcharge by more
//! than the income earned above that threshold. The cap is measured against
//! the slab tax at the threshold income itself.

use rust_decimal::Decimal;
use tracing::trace;

use crate::RegimeConfig;
use crate::calculations::common::round_to_rupee;
use crate::calculations::slab::slab_tax;

/// Surcharge owed on `tax` for a taxpayer with `total_income`.
///
/// Returns zero at or below the lowest tier threshold. The result is rounded
/// once, after the marginal-relief cap has been applied.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::RegimeConfig;
/// use tax_core::calculations::surcharge;
///
/// let config = RegimeConfig::builtin();
///
/// // Well inside the 10% tier: no relief.
/// assert_eq!(surcharge(config, dec!(6000000), dec!(1380000)), dec!(138000));
/// // 100 rupees over the threshold: surcharge limited to 70.
/// assert_eq!(surcharge(config, dec!(5000100), dec!(1080030)), dec!(70));
/// ```
pub fn surcharge(
    config: &RegimeConfig,
    total_income: Decimal,
    tax: Decimal,
) -> Decimal {
    let Some(tier) = config.surcharge_tier_for(total_income) else {
        return Decimal::ZERO;
    };
    if tier.rate.is_zero() {
        return Decimal::ZERO;
    }

    let uncapped = tax * tier.rate;

    let tax_at_threshold = slab_tax(&config.brackets, tier.threshold);
    let max_tax_with_surcharge = tax_at_threshold + (total_income - tier.threshold);

    if tax.saturating_add(uncapped) > max_tax_with_surcharge {
        trace!(
            threshold = %tier.threshold,
            %uncapped,
            %max_tax_with_surcharge,
            "surcharge limited by marginal relief"
        );
        return round_to_rupee(max_tax_with_surcharge - tax);
    }

    round_to_rupee(uncapped)
}
