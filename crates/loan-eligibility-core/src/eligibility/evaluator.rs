use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::eligibility::policy::PolicyThresholds;
use crate::eligibility::profile::{ApplicantProfile, IncomeAssessment};
use crate::types::{LoanCategory, Money, Percent};
use crate::LoanResult;

/// DTI assigned when there is no income to divide by.
pub const MAX_DTI_SENTINEL: Percent = dec!(100);

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// The screening check that rejected an application, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityCheck {
    CreditScore,
    DebtToIncome,
    AssetValue,
    IncomeSufficiency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub eligible: bool,
    /// At most one entry: the first failing check short-circuits the rest.
    pub reasons: Vec<String>,
    pub failed_check: Option<EligibilityCheck>,
    /// Policy loan cap before any DTI adjustment. Zero when ineligible.
    pub max_loan: Money,
    /// Existing debt over income, in percent (2 dp).
    pub dti: Percent,
    pub category: LoanCategory,
    pub thresholds: PolicyThresholds,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Screen an applicant against policy thresholds.
///
/// Checks run in a fixed order (credit score, DTI, asset value, income
/// sufficiency) and the first failure ends evaluation with a single reason.
/// The loan cap is derived from the asset's LTV for secured categories and
/// from annual income for unsecured ones.
pub fn evaluate_eligibility(
    applicant: &ApplicantProfile,
    thresholds: &PolicyThresholds,
) -> LoanResult<EligibilityResult> {
    applicant.validate()?;
    thresholds.validate()?;

    let dti = debt_to_income(applicant.existing_monthly_debt, applicant.monthly_income);

    let verdict = screen(applicant, thresholds, dti);
    let result = match verdict {
        Ok(max_loan) => EligibilityResult {
            eligible: true,
            reasons: Vec::new(),
            failed_check: None,
            max_loan,
            dti: dti.round_dp(2),
            category: applicant.category,
            thresholds: thresholds.clone(),
        },
        Err((check, reason)) => EligibilityResult {
            eligible: false,
            reasons: vec![reason],
            failed_check: Some(check),
            max_loan: Decimal::ZERO,
            dti: dti.round_dp(2),
            category: applicant.category,
            thresholds: thresholds.clone(),
        },
    };

    tracing::debug!(
        category = %result.category,
        eligible = result.eligible,
        failed_check = ?result.failed_check,
        max_loan = %result.max_loan,
        dti = %result.dti,
        "eligibility evaluated"
    );

    Ok(result)
}

/// Debt-to-income in percent. Zero income is treated as maximal DTI.
pub fn debt_to_income(existing_monthly_debt: Money, monthly_income: Money) -> Percent {
    if monthly_income.is_zero() {
        return MAX_DTI_SENTINEL;
    }
    existing_monthly_debt / monthly_income * dec!(100)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn screen(
    applicant: &ApplicantProfile,
    thresholds: &PolicyThresholds,
    dti: Percent,
) -> Result<Money, (EligibilityCheck, String)> {
    if applicant.credit_score < thresholds.min_credit_score {
        return Err((
            EligibilityCheck::CreditScore,
            format!(
                "Credit score {} is below the policy minimum of {}",
                applicant.credit_score, thresholds.min_credit_score
            ),
        ));
    }

    if dti > thresholds.max_dti {
        return Err((
            EligibilityCheck::DebtToIncome,
            format!(
                "Debt-to-income ratio of {}% exceeds the policy maximum of {}%",
                dti.round_dp(2),
                thresholds.max_dti
            ),
        ));
    }

    let max_loan = match thresholds.ltv.for_category(applicant.category) {
        Some(ltv) => {
            let asset_value = applicant.asset_value.unwrap_or(Decimal::ZERO);
            if asset_value <= Decimal::ZERO {
                return Err((
                    EligibilityCheck::AssetValue,
                    format!(
                        "A {} loan requires a declared asset value greater than zero",
                        applicant.category
                    ),
                ));
            }
            asset_value * ltv
        }
        None => applicant.monthly_income * dec!(12) * thresholds.ltv.unsecured_income_share,
    };

    if let Some(IncomeAssessment::Insufficient { reason }) = &applicant.income_assessment {
        let criteria = if thresholds.income_threshold.is_empty() {
            "policy income criteria".to_string()
        } else {
            thresholds.income_threshold.clone()
        };
        return Err((
            EligibilityCheck::IncomeSufficiency,
            format!("Income does not meet {criteria}: {reason}"),
        ));
    }

    Ok(max_loan)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
