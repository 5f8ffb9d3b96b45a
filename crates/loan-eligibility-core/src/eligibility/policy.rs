use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::eligibility::profile::non_negative;
use crate::types::{LoanCategory, Percent, Rate};
use crate::LoanResult;

/// Loan-to-value limits per category, plus the income share used to cap
/// unsecured lending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LtvLimits {
    pub home: Rate,
    pub car: Rate,
    /// Share of annual income lendable without collateral.
    pub unsecured_income_share: Rate,
}

impl Default for LtvLimits {
    fn default() -> Self {
        Self {
            home: dec!(0.7),
            car: dec!(0.8),
            unsecured_income_share: dec!(0.2),
        }
    }
}

impl LtvLimits {
    /// LTV ratio for a secured category; `None` for unsecured lending.
    pub fn for_category(&self, category: LoanCategory) -> Option<Rate> {
        match category {
            LoanCategory::Home => Some(self.home),
            LoanCategory::Car => Some(self.car),
            LoanCategory::Personal => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyThresholds {
    #[serde(alias = "min_cibil")]
    pub min_credit_score: u32,
    /// Maximum debt-to-income, in percent.
    pub max_dti: Percent,
    /// Annual interest rate, in percent.
    pub interest_rate: Percent,
    #[serde(default = "default_min_tenure")]
    pub min_tenure_months: u32,
    #[serde(alias = "max_tenure")]
    pub max_tenure_months: u32,
    /// Free-text description of the minimum qualifying income.
    #[serde(default)]
    pub income_threshold: String,
    #[serde(default)]
    pub ltv: LtvLimits,
}

fn default_min_tenure() -> u32 {
    1
}

impl PolicyThresholds {
    pub fn validate(&self) -> LoanResult<()> {
        non_negative("max_dti", self.max_dti)?;
        non_negative("interest_rate", self.interest_rate)?;
        if self.max_tenure_months == 0 {
            return Err(LoanError::InvalidTenure {
                months: self.max_tenure_months,
                reason: "Policy maximum tenure must be at least one month".into(),
            });
        }
        if self.min_tenure_months > self.max_tenure_months {
            return Err(LoanError::InvalidTenure {
                months: self.min_tenure_months,
                reason: format!(
                    "Policy minimum tenure exceeds maximum of {} months",
                    self.max_tenure_months
                ),
            });
        }
        for (field, ratio) in [
            ("ltv.home", self.ltv.home),
            ("ltv.car", self.ltv.car),
            ("ltv.unsecured_income_share", self.ltv.unsecured_income_share),
        ] {
            if ratio < Decimal::ZERO || ratio > Decimal::ONE {
                return Err(LoanError::InvalidInput {
                    field: field.into(),
                    reason: format!("Ratio must lie within [0, 1] (got {ratio})"),
                });
            }
        }
        Ok(())
    }
}
