//! Income tax liability under the new regime, from income heads to the
//! advance-tax schedule.
//!
//! # Pipeline
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Gross total income: salary + business + rental + other |
//! | 2    | Standard deduction (only when salary income is positive) |
//! | 3    | Total income: Step 1 - Step 2, minimum 0 |
//! | 4    | Slab tax on Step 3, rounded once |
//! | 5    | Marginal relief just above the rebate limit |
//! | 6    | Tax before rebate: Step 4 - Step 5 |
//! | 7    | Section 87A rebate (total income within the rebate limit) |
//! | 8    | Tax after rebate: Step 6 - Step 7 |
//! | 9    | Surcharge on Step 8, capped by its own marginal relief |
//! | 10   | Tax after surcharge: Step 8 + Step 9 |
//! | 11   | Health and education cess on Step 10 |
//! | 12   | Total tax: Step 10 + Step 11 |
//! | 13   | Advance-tax installments from Step 12 |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{IncomeInputs, RegimeConfig, TaxEngine};
//!
//! let config = RegimeConfig::fy_2025_26();
//! let engine = TaxEngine::new(&config);
//!
//! let result = engine.calculate(&IncomeInputs::salary_only(dec!(1500000)));
//!
//! assert_eq!(result.total_income, dec!(1425000));
//! assert_eq!(result.tax_before_rebate, dec!(93750));
//! assert_eq!(result.cess, dec!(3750));
//! assert_eq!(result.total_tax, dec!(97500));
//! assert_eq!(result.installments[3].cumulative_amount, dec!(97500));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::calculations::common::{max, round_to_rupee};
use crate::calculations::installments::build_installments;
use crate::calculations::slab::{marginal_relief, slab_tax};
use crate::calculations::surcharge::surcharge;
use crate::{IncomeInputs, RegimeConfig, TaxCalculation};

/// Runs the full pipeline against the built-in FY 2025-26 regime.
pub fn compute_tax(inputs: &IncomeInputs) -> TaxCalculation {
    TaxEngine::new(RegimeConfig::builtin()).calculate(inputs)
}

/// Liability calculator bound to one regime configuration.
///
/// The engine holds no state of its own; any number of callers may share it.
#[derive(Debug, Clone, Copy)]
pub struct TaxEngine<'a> {
    config: &'a RegimeConfig,
}

impl<'a> TaxEngine<'a> {
    /// Creates an engine over `config`.
    ///
    /// The configuration is assumed to satisfy [`RegimeConfig::validate`].
    pub fn new(config: &'a RegimeConfig) -> Self {
        Self { config }
    }

    /// Computes the complete liability breakdown for `inputs`.
    ///
    /// Total over non-negative inputs: there is no failure path.
    pub fn calculate(
        &self,
        inputs: &IncomeInputs,
    ) -> TaxCalculation {
        let gross_total_income = inputs.gross_total();
        let standard_deduction = self.standard_deduction(inputs.salary);
        let total_income = self.total_income(gross_total_income, standard_deduction);
        trace!(%gross_total_income, %standard_deduction, %total_income, "aggregated income");

        let slab = slab_tax(&self.config.brackets, total_income);
        let relief = marginal_relief(self.config, total_income, slab);
        let tax_before_rebate = slab - relief;
        trace!(%slab, %relief, %tax_before_rebate, "applied slab tax");

        let rebate_u87a = self.rebate(total_income, tax_before_rebate);
        let tax_after_rebate = tax_before_rebate - rebate_u87a;
        trace!(%rebate_u87a, %tax_after_rebate, "applied 87A rebate");

        let surcharge = surcharge(self.config, total_income, tax_after_rebate);
        let tax_after_surcharge = tax_after_rebate + surcharge;

        let cess = self.cess(tax_after_surcharge);
        let total_tax = tax_after_surcharge.saturating_add(cess);
        trace!(%surcharge, %cess, %total_tax, "applied surcharge and cess");

        let installments = build_installments(&self.config.installments, total_tax);

        debug!(
            assessment_year = %self.config.assessment_year,
            %total_income,
            %total_tax,
            "computed tax liability"
        );

        TaxCalculation {
            gross_total_income,
            standard_deduction,
            total_income,
            marginal_relief: relief,
            tax_before_rebate,
            rebate_u87a,
            tax_after_rebate,
            surcharge,
            tax_after_surcharge,
            cess,
            total_tax,
            installments,
        }
    }

    /// Standard deduction, available only against salary income.
    fn standard_deduction(
        &self,
        salary: Decimal,
    ) -> Decimal {
        if salary > Decimal::ZERO {
            self.config.standard_deduction
        } else {
            Decimal::ZERO
        }
    }

    fn total_income(
        &self,
        gross_total_income: Decimal,
        standard_deduction: Decimal,
    ) -> Decimal {
        max(gross_total_income - standard_deduction, Decimal::ZERO)
    }

    /// Section 87A rebate. All-or-nothing on the income limit.
    fn rebate(
        &self,
        total_income: Decimal,
        tax_before_rebate: Decimal,
    ) -> Decimal {
        if total_income <= self.config.rebate_income_limit {
            tax_before_rebate.min(self.config.rebate_max)
        } else {
            Decimal::ZERO
        }
    }

    fn cess(
        &self,
        tax_after_surcharge: Decimal,
    ) -> Decimal {
        round_to_rupee(tax_after_surcharge.saturating_mul(self.config.cess_rate))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn engine() -> TaxEngine<'static> {
        TaxEngine::new(RegimeConfig::builtin())
    }

    fn business_only(amount: Decimal) -> IncomeInputs {
        IncomeInputs {
            business: amount,
            ..Default::default()
        }
    }

    // =========================================================================
    // standard_deduction tests
    // =========================================================================

    #[test]
    fn standard_deduction_applies_with_salary() {
        assert_eq!(engine().standard_deduction(dec!(1)), dec!(75000));
    }

    #[test]
    fn standard_deduction_absent_without_salary() {
        assert_eq!(engine().standard_deduction(dec!(0)), dec!(0));
    }

    // =========================================================================
    // total_income tests
    // =========================================================================

    #[test]
    fn total_income_subtracts_deduction() {
        assert_eq!(engine().total_income(dec!(1500000), dec!(75000)), dec!(1425000));
    }

    #[test]
    fn total_income_floors_at_zero() {
        assert_eq!(engine().total_income(dec!(50000), dec!(75000)), dec!(0));
    }

    // =========================================================================
    // rebate tests
    // =========================================================================

    #[test]
    fn rebate_wipes_tax_within_limit() {
        assert_eq!(engine().rebate(dec!(1125000), dec!(52500)), dec!(52500));
    }

    #[test]
    fn rebate_is_capped() {
        assert_eq!(engine().rebate(dec!(1200000), dec!(65000)), dec!(60000));
    }

    #[test]
    fn rebate_is_zero_above_limit() {
        assert_eq!(engine().rebate(dec!(1200001), dec!(60000)), dec!(0));
    }

    // =========================================================================
    // cess tests
    // =========================================================================

    #[test]
    fn cess_is_four_percent_rounded() {
        assert_eq!(engine().cess(dec!(93750)), dec!(3750));
        // 1080100 * 4% = 43204
        assert_eq!(engine().cess(dec!(1080100)), dec!(43204));
        // 10 * 4% = 0.4
        assert_eq!(engine().cess(dec!(10)), dec!(0));
        // 13 * 4% = 0.52
        assert_eq!(engine().cess(dec!(13)), dec!(1));
    }

    // =========================================================================
    // calculate (integration) tests
    // =========================================================================

    #[test]
    fn calculate_salaried_above_relief_band() {
        let result = engine().calculate(&IncomeInputs::salary_only(dec!(1500000)));

        assert_eq!(result.gross_total_income, dec!(1500000));
        assert_eq!(result.standard_deduction, dec!(75000));
        assert_eq!(result.total_income, dec!(1425000));
        assert_eq!(result.marginal_relief, dec!(0));
        // 0 + 20000 + 40000 + 33750
        assert_eq!(result.tax_before_rebate, dec!(93750));
        assert_eq!(result.rebate_u87a, dec!(0));
        assert_eq!(result.tax_after_rebate, dec!(93750));
        assert_eq!(result.surcharge, dec!(0));
        assert_eq!(result.tax_after_surcharge, dec!(93750));
        assert_eq!(result.cess, dec!(3750));
        assert_eq!(result.total_tax, dec!(97500));
        assert!(result.has_liability());
    }

    #[test]
    fn calculate_salaried_within_rebate_limit() {
        let result = engine().calculate(&IncomeInputs::salary_only(dec!(1200000)));

        assert_eq!(result.total_income, dec!(1125000));
        // 20000 + 32500
        assert_eq!(result.tax_before_rebate, dec!(52500));
        assert_eq!(result.rebate_u87a, dec!(52500));
        assert_eq!(result.total_tax, dec!(0));
        assert!(!result.has_liability());
        assert!(result.rebate_zeroed_tax());
    }

    #[test]
    fn calculate_exactly_at_rebate_limit() {
        let result = engine().calculate(&IncomeInputs::salary_only(dec!(1275000)));

        assert_eq!(result.total_income, dec!(1200000));
        assert_eq!(result.marginal_relief, dec!(0));
        assert_eq!(result.rebate_u87a, dec!(60000));
        assert_eq!(result.total_tax, dec!(0));
    }

    #[test]
    fn calculate_inside_relief_band() {
        let result = engine().calculate(&business_only(dec!(1250000)));

        assert_eq!(result.standard_deduction, dec!(0));
        assert_eq!(result.total_income, dec!(1250000));
        // slab 67500 limited to the 50000 excess
        assert_eq!(result.marginal_relief, dec!(17500));
        assert_eq!(result.tax_before_rebate, dec!(50000));
        assert_eq!(result.rebate_u87a, dec!(0));
        assert_eq!(result.cess, dec!(2000));
        assert_eq!(result.total_tax, dec!(52000));
    }

    #[test]
    fn calculate_at_relief_band_upper_limit() {
        let result = engine().calculate(&business_only(dec!(1275000)));

        // slab 71250 already below the 75000 excess
        assert_eq!(result.marginal_relief, dec!(0));
        assert_eq!(result.tax_before_rebate, dec!(71250));
        assert!(result.tax_before_rebate <= result.total_income - dec!(1200000));
        assert_eq!(result.total_tax, dec!(74100));
    }

    #[test]
    fn calculate_with_surcharge_relief() {
        let inputs = IncomeInputs {
            other: dec!(5000100),
            ..Default::default()
        };

        let result = engine().calculate(&inputs);

        assert_eq!(result.tax_after_rebate, dec!(1080030));
        assert_eq!(result.surcharge, dec!(70));
        assert_eq!(result.tax_after_surcharge, dec!(1080100));
        assert_eq!(result.cess, dec!(43204));
        assert_eq!(result.total_tax, dec!(1123304));
    }

    #[test]
    fn calculate_with_full_surcharge() {
        let result = engine().calculate(&business_only(dec!(6000000)));

        assert_eq!(result.tax_after_rebate, dec!(1380000));
        assert_eq!(result.surcharge, dec!(138000));
        assert_eq!(result.cess, dec!(60720));
        assert_eq!(result.total_tax, dec!(1578720));
    }

    #[test]
    fn calculate_mixed_income_heads() {
        let inputs = IncomeInputs::new(dec!(900000), dec!(300000), dec!(200000), dec!(100000));

        let result = engine().calculate(&inputs);

        assert_eq!(result.gross_total_income, dec!(1500000));
        assert_eq!(result.standard_deduction, dec!(75000));
        assert_eq!(result.total_tax, dec!(97500));
    }

    #[test]
    fn calculate_income_below_deduction() {
        let result = engine().calculate(&IncomeInputs::salary_only(dec!(50000)));

        assert_eq!(result.total_income, dec!(0));
        assert_eq!(result.total_tax, dec!(0));
        assert!(!result.rebate_zeroed_tax());
    }

    #[test]
    fn calculate_zero_inputs() {
        let result = engine().calculate(&IncomeInputs::default());

        assert_eq!(result.gross_total_income, dec!(0));
        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.installments.len(), 4);
    }

    #[test]
    fn calculate_builds_schedule_from_total() {
        let result = engine().calculate(&IncomeInputs::salary_only(dec!(1500000)));

        let cumulative: Vec<Decimal> = result
            .installments
            .iter()
            .map(|i| i.cumulative_amount)
            .collect();
        assert_eq!(
            cumulative,
            vec![dec!(14625), dec!(43875), dec!(73125), dec!(97500)]
        );
    }

    #[test]
    fn calculate_is_idempotent() {
        let inputs = IncomeInputs::new(dec!(2345678), dec!(12345), dec!(0), dec!(999));

        assert_eq!(engine().calculate(&inputs), engine().calculate(&inputs));
    }

    #[test]
    fn calculate_handles_28_digit_salary() {
        let salary = dec!(9000000000000000000000000000);

        let calc = engine().calculate(&IncomeInputs::salary_only(salary));

        assert!(calc.surcharge > Decimal::ZERO);
        assert!(calc.total_tax > calc.tax_after_surcharge);
        assert_eq!(calc.installments[3].cumulative_amount, calc.total_tax);
    }

    #[test]
    fn calculate_saturates_heads_at_largest_amount() {
        let calc = engine().calculate(&IncomeInputs::new(
            Decimal::MAX,
            Decimal::MAX,
            Decimal::ZERO,
            Decimal::ZERO,
        ));

        assert_eq!(calc.gross_total_income, Decimal::MAX);
        assert_eq!(calc.total_income, Decimal::MAX - dec!(75000));
        assert_eq!(calc.installments[3].cumulative_amount, calc.total_tax);
    }

    #[test]
    fn compute_tax_uses_builtin_regime() {
        let inputs = IncomeInputs::salary_only(dec!(1500000));

        assert_eq!(compute_tax(&inputs), engine().calculate(&inputs));
    }
}
