use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::eligibility::evaluator::MAX_DTI_SENTINEL;
use crate::eligibility::profile::non_negative;
use crate::emi::{compute_emi, validate_tenure};
use crate::error::LoanError;
use crate::types::{Money, Percent};
use crate::LoanResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RescaleOutcome {
    pub recommended_loan: Money,
    pub emi: Money,
    /// (existing debt + EMI) / income, in percent.
    pub dti: Percent,
    pub was_rescaled: bool,
    /// Existing debt was exactly zero, so `dti` reflects the new EMI alone.
    pub emi_only_dti: bool,
}

/// Shrink a policy-capped loan until its EMI fits under the DTI ceiling.
///
/// Single proportional pass: the principal is scaled by `allowed_emi / emi`,
/// floored to a whole currency unit, and the EMI recomputed once. EMI is not
/// exactly linear in principal after rounding, so the resulting DTI can sit a
/// hair above `max_dti_pct`; callers see that in `dti` rather than a second
/// iteration.
pub fn rescale_loan(
    max_loan: Money,
    annual_rate_pct: Percent,
    tenure_months: u32,
    existing_debt: Money,
    income: Money,
    max_dti_pct: Percent,
) -> LoanResult<RescaleOutcome> {
    validate_tenure(tenure_months)?;
    non_negative("max_loan", max_loan)?;
    non_negative("existing_debt", existing_debt)?;
    non_negative("income", income)?;
    non_negative("max_dti_pct", max_dti_pct)?;

    let emi_only_dti = existing_debt.is_zero();
    let emi = compute_emi(max_loan, annual_rate_pct, tenure_months)?;
    let dti = total_dti(existing_debt, emi, income);

    if dti <= max_dti_pct {
        tracing::debug!(%max_loan, %emi, %dti, "loan within DTI ceiling");
        return Ok(RescaleOutcome {
            recommended_loan: max_loan,
            emi,
            dti,
            was_rescaled: false,
            emi_only_dti,
        });
    }

    let allowed_emi = max_dti_pct * income / dec!(100) - existing_debt;
    if allowed_emi <= Decimal::ZERO || emi.is_zero() {
        tracing::warn!(%allowed_emi, %existing_debt, %income, "no positive EMI fits the DTI ceiling");
        return Err(LoanError::PolicyInfeasible {
            allowed_emi,
            reason: format!(
                "existing monthly debt of {existing_debt} leaves no room under the {max_dti_pct}% DTI ceiling"
            ),
        });
    }

    // allowed_emi < emi here, so the scale factor is below one and the product
    // cannot exceed max_loan.
    let new_loan = (max_loan * (allowed_emi / emi)).floor();
    let new_emi = compute_emi(new_loan, annual_rate_pct, tenure_months)?;
    let new_dti = total_dti(existing_debt, new_emi, income);

    tracing::info!(
        from = %max_loan,
        to = %new_loan,
        emi = %new_emi,
        dti = %new_dti,
        "loan rescaled to meet DTI ceiling"
    );

    Ok(RescaleOutcome {
        recommended_loan: new_loan,
        emi: new_emi,
        dti: new_dti,
        was_rescaled: true,
        emi_only_dti,
    })
}

fn total_dti(existing_debt: Money, emi: Money, income: Money) -> Percent {
    if income.is_zero() {
        return MAX_DTI_SENTINEL;
    }
    (existing_debt + emi) / income * dec!(100)
}
