use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::types::{LoanCategory, Money};
use crate::LoanResult;

/// Qualitative income judgment made upstream against the policy's income
/// criteria. Not computed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum IncomeAssessment {
    Sufficient,
    Insufficient { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    /// Gross monthly income.
    pub monthly_income: Money,
    /// Existing monthly debt service (other EMIs, card minimums).
    #[serde(default)]
    pub existing_monthly_debt: Money,
    /// Bureau credit score (CIBIL scale).
    #[serde(alias = "cibil_score")]
    pub credit_score: u32,
    /// Declared property or vehicle value. Only read for secured categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_value: Option<Money>,
    pub category: LoanCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_assessment: Option<IncomeAssessment>,
}

impl ApplicantProfile {
    /// Reject negative monetary values at the boundary.
    pub fn validate(&self) -> LoanResult<()> {
        non_negative("monthly_income", self.monthly_income)?;
        non_negative("existing_monthly_debt", self.existing_monthly_debt)?;
        if let Some(value) = self.asset_value {
            non_negative("asset_value", value)?;
        }
        Ok(())
    }
}

pub(crate) fn non_negative(field: &str, value: Decimal) -> LoanResult<()> {
    if value < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: field.into(),
            reason: format!("{field} cannot be negative (got {value})"),
        });
    }
    Ok(())
}
