use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One advance-tax payment in the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub due_date_label: String,
    /// Share of the annual liability that must be paid by this date.
    pub cumulative_percentage: u32,
    /// Payment due on this date alone.
    pub amount: Decimal,
    /// Total paid up to and including this date.
    pub cumulative_amount: Decimal,
}

/// Full breakdown of a liability computation.
///
/// Every field is derived from the inputs; nothing here is independent state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculation {
    pub gross_total_income: Decimal,
    pub standard_deduction: Decimal,
    pub total_income: Decimal,
    /// Relief already subtracted to arrive at `tax_before_rebate`.
    pub marginal_relief: Decimal,
    pub tax_before_rebate: Decimal,
    pub rebate_u87a: Decimal,
    pub tax_after_rebate: Decimal,
    pub surcharge: Decimal,
    pub tax_after_surcharge: Decimal,
    pub cess: Decimal,
    pub total_tax: Decimal,
    pub installments: Vec<Installment>,
}

impl TaxCalculation {
    pub fn has_liability(&self) -> bool {
        self.total_tax > Decimal::ZERO
    }

    /// True when there was income but the 87A rebate wiped out the tax.
    pub fn rebate_zeroed_tax(&self) -> bool {
        self.total_income > Decimal::ZERO
            && self.rebate_u87a > Decimal::ZERO
            && self.total_tax == Decimal::ZERO
    }
}
