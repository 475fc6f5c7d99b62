use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The four income heads fed into a calculation.
///
/// Amounts are expected to be non-negative; blank or invalid entries must be
/// coerced to zero before they reach the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeInputs {
    /// Gross salary income. A positive value unlocks the standard deduction.
    pub salary: Decimal,
    /// Income from business or profession.
    pub business: Decimal,
    /// Income from house property (rent).
    pub rental: Decimal,
    /// Income from other sources (interest, dividends).
    pub other: Decimal,
}

impl IncomeInputs {
    pub fn new(
        salary: Decimal,
        business: Decimal,
        rental: Decimal,
        other: Decimal,
    ) -> Self {
        Self {
            salary,
            business,
            rental,
            other,
        }
    }

    pub fn salary_only(salary: Decimal) -> Self {
        Self {
            salary,
            ..Default::default()
        }
    }

    /// Sum of all four heads, saturating at [`Decimal::MAX`].
    pub fn gross_total(&self) -> Decimal {
        self.salary
            .saturating_add(self.business)
            .saturating_add(self.rental)
            .saturating_add(self.other)
    }
}
