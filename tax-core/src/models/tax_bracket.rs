use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One progressive slab: income in `(min_income, max_income]` is taxed at
/// `tax_rate`. The top slab has no upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    /// Portion of `income` that falls inside this slab.
    pub fn taxable_slice(
        &self,
        income: Decimal,
    ) -> Decimal {
        if income <= self.min_income {
            return Decimal::ZERO;
        }
        let top = match self.max_income {
            Some(max) => income.min(max),
            None => income,
        };
        top - self.min_income
    }
}
