use std::sync::OnceLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TaxBracket;

/// Errors raised when a regime configuration is internally inconsistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no tax brackets configured")]
    NoTaxBrackets,

    #[error("first bracket must start at zero, found {0}")]
    FirstBracketNotZero(Decimal),

    #[error("bracket {index} starts at {found} but the previous bracket ends at {expected}")]
    NonContiguousBracket {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("bracket {0} has no upper bound but is not the last bracket")]
    UnboundedBeforeLast(usize),

    #[error("last bracket must be unbounded")]
    BoundedLastBracket,

    #[error("bracket {0} has an empty or inverted income range")]
    EmptyBracket(usize),

    #[error("bracket {0} rate must be within 0 and 1")]
    RateOutOfRange(usize),

    #[error("bracket {0} rate is lower than the bracket below it")]
    DecreasingRate(usize),

    #[error("surcharge tier {0} threshold must be above the previous tier")]
    SurchargeTierOrder(usize),

    #[error("surcharge tier {0} rate must be within 0 and 1")]
    SurchargeRateOutOfRange(usize),

    #[error("{0} must not be negative")]
    NegativeAmount(&'static str),

    #[error("marginal relief upper limit {upper} is below the rebate income limit {rebate_limit}")]
    ReliefLimitBelowRebateLimit {
        upper: Decimal,
        rebate_limit: Decimal,
    },

    #[error("cess rate must not be negative")]
    NegativeCessRate,

    #[error("no installments configured")]
    NoInstallments,

    #[error("installment {0} percentage must rise above the previous one and stay within 100")]
    InstallmentOrder(usize),

    #[error("last installment must reach 100 percent, found {0}")]
    IncompleteSchedule(u32),
}

/// A surcharge band applied when total income exceeds `threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeTier {
    pub threshold: Decimal,
    pub rate: Decimal,
}

/// A statutory advance-tax due date and the cumulative share owed by then.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentDue {
    pub due_date_label: String,
    pub cumulative_percentage: u32,
}

/// Statutory constants for one year of the new tax regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeConfig {
    pub assessment_year: String,
    pub financial_year: String,
    pub standard_deduction: Decimal,
    pub rebate_income_limit: Decimal,
    pub rebate_max: Decimal,
    pub marginal_relief_upper_limit: Decimal,
    pub cess_rate: Decimal,
    pub brackets: Vec<TaxBracket>,
    pub surcharge_tiers: Vec<SurchargeTier>,
    pub installments: Vec<InstallmentDue>,
}

fn rupees(amount: i64) -> Decimal {
    Decimal::new(amount, 0)
}

fn percent(rate: i64) -> Decimal {
    Decimal::new(rate, 2)
}

fn bracket(
    min_income: i64,
    max_income: Option<i64>,
    rate: i64,
) -> TaxBracket {
    TaxBracket {
        min_income: rupees(min_income),
        max_income: max_income.map(rupees),
        tax_rate: percent(rate),
    }
}

fn due(
    label: &str,
    cumulative_percentage: u32,
) -> InstallmentDue {
    InstallmentDue {
        due_date_label: label.to_string(),
        cumulative_percentage,
    }
}

impl RegimeConfig {
    /// New regime (section 115BAC) for FY 2025-26, assessment year 2026-27.
    pub fn fy_2025_26() -> Self {
        Self {
            assessment_year: "2026-27".to_string(),
            financial_year: "2025-26".to_string(),
            standard_deduction: rupees(75_000),
            rebate_income_limit: rupees(1_200_000),
            rebate_max: rupees(60_000),
            marginal_relief_upper_limit: rupees(1_275_000),
            cess_rate: percent(4),
            brackets: vec![
                bracket(0, Some(400_000), 0),
                bracket(400_000, Some(800_000), 5),
                bracket(800_000, Some(1_200_000), 10),
                bracket(1_200_000, Some(1_600_000), 15),
                bracket(1_600_000, Some(2_000_000), 20),
                bracket(2_000_000, Some(2_400_000), 25),
                bracket(2_400_000, None, 30),
            ],
            surcharge_tiers: vec![
                SurchargeTier {
                    threshold: rupees(5_000_000),
                    rate: percent(10),
                },
                SurchargeTier {
                    threshold: rupees(10_000_000),
                    rate: percent(15),
                },
                SurchargeTier {
                    threshold: rupees(20_000_000),
                    rate: percent(25),
                },
            ],
            installments: vec![
                due("15 June 2025", 15),
                due("15 September 2025", 45),
                due("15 December 2025", 75),
                due("15 March 2026", 100),
            ],
        }
    }

    /// Shared read-only instance of [`RegimeConfig::fy_2025_26`].
    pub fn builtin() -> &'static RegimeConfig {
        static BUILTIN: OnceLock<RegimeConfig> = OnceLock::new();
        BUILTIN.get_or_init(Self::fy_2025_26)
    }

    /// Surcharge tier that applies to `total_income`, if any.
    ///
    /// This is the highest tier whose threshold lies strictly below the income.
    pub fn surcharge_tier_for(
        &self,
        total_income: Decimal,
    ) -> Option<&SurchargeTier> {
        self.surcharge_tiers
            .iter()
            .rev()
            .find(|tier| total_income > tier.threshold)
    }

    /// Checks the structural invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_amounts()?;
        self.validate_brackets()?;
        self.validate_surcharge_tiers()?;

        if self.cess_rate < Decimal::ZERO {
            return Err(ConfigError::NegativeCessRate);
        }

        self.validate_installments()
    }

    fn validate_amounts(&self) -> Result<(), ConfigError> {
        let amounts = [
            ("standard deduction", self.standard_deduction),
            ("rebate income limit", self.rebate_income_limit),
            ("rebate maximum", self.rebate_max),
            ("marginal relief upper limit", self.marginal_relief_upper_limit),
        ];
        if let Some((name, _)) = amounts.into_iter().find(|(_, amount)| *amount < Decimal::ZERO) {
            return Err(ConfigError::NegativeAmount(name));
        }

        if self.marginal_relief_upper_limit < self.rebate_income_limit {
            return Err(ConfigError::ReliefLimitBelowRebateLimit {
                upper: self.marginal_relief_upper_limit,
                rebate_limit: self.rebate_income_limit,
            });
        }
        Ok(())
    }

    fn validate_brackets(&self) -> Result<(), ConfigError> {
        let first = self.brackets.first().ok_or(ConfigError::NoTaxBrackets)?;
        if !first.min_income.is_zero() {
            return Err(ConfigError::FirstBracketNotZero(first.min_income));
        }

        let last_index = self.brackets.len() - 1;
        for (index, b) in self.brackets.iter().enumerate() {
            if b.tax_rate < Decimal::ZERO || b.tax_rate > Decimal::ONE {
                return Err(ConfigError::RateOutOfRange(index));
            }

            match b.max_income {
                Some(max) if max <= b.min_income => return Err(ConfigError::EmptyBracket(index)),
                Some(_) if index == last_index => return Err(ConfigError::BoundedLastBracket),
                None if index != last_index => return Err(ConfigError::UnboundedBeforeLast(index)),
                _ => {}
            }

            if index > 0 {
                let previous = &self.brackets[index - 1];
                // previous.max_income is Some here, checked on the prior iteration
                let expected = previous.max_income.unwrap_or(Decimal::MAX);
                if b.min_income != expected {
                    return Err(ConfigError::NonContiguousBracket {
                        index,
                        expected,
                        found: b.min_income,
                    });
                }
                if b.tax_rate < previous.tax_rate {
                    return Err(ConfigError::DecreasingRate(index));
                }
            }
        }

        Ok(())
    }

    fn validate_surcharge_tiers(&self) -> Result<(), ConfigError> {
        for (index, tier) in self.surcharge_tiers.iter().enumerate() {
            if tier.rate < Decimal::ZERO || tier.rate > Decimal::ONE {
                return Err(ConfigError::SurchargeRateOutOfRange(index));
            }
            if index > 0 && tier.threshold <= self.surcharge_tiers[index - 1].threshold {
                return Err(ConfigError::SurchargeTierOrder(index));
            }
        }
        Ok(())
    }

    fn validate_installments(&self) -> Result<(), ConfigError> {
        let mut previous = 0;
        for (index, due) in self.installments.iter().enumerate() {
            if due.cumulative_percentage <= previous || due.cumulative_percentage > 100 {
                return Err(ConfigError::InstallmentOrder(index));
            }
            previous = due.cumulative_percentage;
        }

        match self.installments.last() {
            None => Err(ConfigError::NoInstallments),
            Some(last) if last.cumulative_percentage != 100 => {
                Err(ConfigError::IncompleteSchedule(last.cumulative_percentage))
            }
            Some(_) => Ok(()),
        }
    }
}

impl Default for RegimeConfig {
    fn default() -> Self {
        Self::fy_2025_26()
    }
}
