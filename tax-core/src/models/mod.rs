mod income_inputs;
mod regime_config;
mod tax_bracket;
mod tax_calculation;

pub use income_inputs::IncomeInputs;
pub use regime_config::{ConfigError, InstallmentDue, RegimeConfig, SurchargeTier};
pub use tax_bracket::TaxBracket;
pub use tax_calculation::{Installment, TaxCalculation};
