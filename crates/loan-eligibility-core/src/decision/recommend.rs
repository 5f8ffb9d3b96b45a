use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::decision::rescale::rescale_loan;
use crate::eligibility::evaluator::MAX_DTI_SENTINEL;
use crate::eligibility::{
    evaluate_eligibility, ApplicantProfile, EligibilityCheck, EligibilityResult, PolicyThresholds,
};
use crate::error::LoanError;
use crate::types::{with_metadata, ComputationOutput, LoanCategory, Money, Percent};
use crate::LoanResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionInput {
    pub applicant: ApplicantProfile,
    pub policy: PolicyThresholds,
    /// Defaults to the policy's maximum tenure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_tenure_months: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDecision {
    pub approved: bool,
    pub category: LoanCategory,
    /// Cap from LTV or income share, before DTI adjustment.
    pub policy_max_loan: Money,
    pub recommended_loan: Money,
    pub tenure_months: u32,
    pub emi: Money,
    /// Total DTI including the recommended EMI, in percent (2 dp).
    pub dti: Percent,
    pub was_rescaled: bool,
    pub emi_only_dti: bool,
    pub reasons: Vec<String>,
    pub applicable_rules: Vec<String>,
    pub next_steps: Vec<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Screen the applicant, size the loan against the DTI ceiling and assemble
/// the rules and next steps that go with the verdict.
pub fn recommend_loan(input: &DecisionInput) -> LoanResult<ComputationOutput<LoanDecision>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let eligibility = evaluate_eligibility(&input.applicant, &input.policy)?;
    let tenure_months = select_tenure(input)?;

    let decision = if eligibility.eligible {
        approved_decision(input, &eligibility, tenure_months, &mut warnings)?
    } else {
        rejected_decision(input, &eligibility, tenure_months)
    };

    let tenure_source = if input.requested_tenure_months.is_some() {
        "requested"
    } else {
        "policy_maximum"
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "tenure_months": tenure_months,
        "tenure_source": tenure_source,
        "interest_rate_pct": input.policy.interest_rate.to_string(),
        "max_dti_pct": input.policy.max_dti.to_string(),
        "income_basis": "monthly",
    });

    Ok(with_metadata(
        "Policy eligibility screen with single-pass DTI rescale",
        &assumptions,
        warnings,
        elapsed,
        decision,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn select_tenure(input: &DecisionInput) -> LoanResult<u32> {
    let policy = &input.policy;
    match input.requested_tenure_months {
        None => Ok(policy.max_tenure_months),
        Some(months) if months < policy.min_tenure_months || months > policy.max_tenure_months => {
            Err(LoanError::InvalidTenure {
                months,
                reason: format!(
                    "Requested tenure must lie within the policy window of {}-{} months",
                    policy.min_tenure_months, policy.max_tenure_months
                ),
            })
        }
        Some(months) => Ok(months),
    }
}

fn approved_decision(
    input: &DecisionInput,
    eligibility: &EligibilityResult,
    tenure_months: u32,
    warnings: &mut Vec<String>,
) -> LoanResult<LoanDecision> {
    let applicant = &input.applicant;
    let policy = &input.policy;

    let outcome = match rescale_loan(
        eligibility.max_loan,
        policy.interest_rate,
        tenure_months,
        applicant.existing_monthly_debt,
        applicant.monthly_income,
        policy.max_dti,
    ) {
        Ok(outcome) => outcome,
        Err(LoanError::PolicyInfeasible { reason, .. }) => {
            return Ok(LoanDecision {
                approved: false,
                category: applicant.category,
                policy_max_loan: eligibility.max_loan,
                recommended_loan: Decimal::ZERO,
                tenure_months,
                emi: Decimal::ZERO,
                dti: eligibility.dti,
                was_rescaled: false,
                emi_only_dti: applicant.existing_monthly_debt.is_zero(),
                reasons: vec![format!("No loan amount satisfies the DTI ceiling: {reason}")],
                applicable_rules: rejection_rules(policy),
                next_steps: vec![
                    "Reduce existing monthly obligations before reapplying".into(),
                    "Consider adding a co-applicant with independent income".into(),
                ],
            });
        }
        Err(e) => return Err(e),
    };

    if outcome.was_rescaled {
        warnings.push(format!(
            "Loan reduced from {} to {} to respect the {}% DTI ceiling",
            eligibility.max_loan,
            outcome.recommended_loan,
            policy.max_dti.normalize()
        ));
    }
    if outcome.dti > policy.max_dti {
        warnings.push(format!(
            "Final DTI {}% exceeds the ceiling by {}pp after single-pass rescale",
            outcome.dti.round_dp(2),
            (outcome.dti - policy.max_dti).round_dp(4)
        ));
    }

    if outcome.recommended_loan.is_zero() {
        warnings.push(format!(
            "Approved with a recommended loan of zero (policy cap {}); no amount can be disbursed",
            eligibility.max_loan
        ));
    }
    if applicant.monthly_income.is_zero() {
        warnings.push(format!(
            "Approved on zero declared income: DTI was taken as {}% and passed only because the ceiling is {}%",
            MAX_DTI_SENTINEL,
            policy.max_dti.normalize()
        ));
    }

    let mut applicable_rules = vec![
        format!("Interest Rate: {}%", policy.interest_rate.normalize()),
        format!("Max DTI Allowed: {}%", policy.max_dti.normalize()),
        format!("Max Tenure Available: {} months", policy.max_tenure_months),
    ];
    if let Some(ltv) = policy.ltv.for_category(applicant.category) {
        applicable_rules.push(format!("Max Loan-to-Value: {}%", (ltv * dec!(100)).normalize()));
    } else {
        applicable_rules.push(format!(
            "Unsecured Cap: {}% of annual income",
            (policy.ltv.unsecured_income_share * dec!(100)).normalize()
        ));
    }

    Ok(LoanDecision {
        approved: true,
        category: applicant.category,
        policy_max_loan: eligibility.max_loan,
        recommended_loan: outcome.recommended_loan,
        tenure_months,
        emi: outcome.emi,
        dti: outcome.dti.round_dp(2),
        was_rescaled: outcome.was_rescaled,
        emi_only_dti: outcome.emi_only_dti,
        reasons: Vec::new(),
        applicable_rules,
        next_steps: vec![
            "Sign loan agreement".into(),
            "Submit original KYC documents".into(),
            "Await disbursement".into(),
        ],
    })
}

fn rejected_decision(
    input: &DecisionInput,
    eligibility: &EligibilityResult,
    tenure_months: u32,
) -> LoanDecision {
    let policy = &input.policy;
    let next_steps = match eligibility.failed_check {
        Some(EligibilityCheck::CreditScore) => vec![
            format!("Improve your credit score to at least {} and reapply", policy.min_credit_score),
            "Review your credit report for errors".into(),
        ],
        Some(EligibilityCheck::DebtToIncome) => vec![
            format!(
                "Reduce existing monthly obligations below {}% of income",
                policy.max_dti.normalize()
            ),
            "Consider adding a co-applicant with independent income".into(),
        ],
        Some(EligibilityCheck::AssetValue) => vec![format!(
            "Provide a valuation of the {} being financed",
            if eligibility.category == LoanCategory::Home { "property" } else { "vehicle" }
        )],
        Some(EligibilityCheck::IncomeSufficiency) | None => vec![
            "Submit additional proof of income".into(),
            "Consider a smaller loan amount or a co-applicant".into(),
        ],
    };

    LoanDecision {
        approved: false,
        category: eligibility.category,
        policy_max_loan: Decimal::ZERO,
        recommended_loan: Decimal::ZERO,
        tenure_months,
        emi: Decimal::ZERO,
        dti: eligibility.dti,
        was_rescaled: false,
        emi_only_dti: false,
        reasons: eligibility.reasons.clone(),
        applicable_rules: rejection_rules(policy),
        next_steps,
    }
}

fn rejection_rules(policy: &PolicyThresholds) -> Vec<String> {
    let income = if policy.income_threshold.is_empty() {
        "not specified"
    } else {
        policy.income_threshold.as_str()
    };
    vec![
        format!("Minimum Credit Score: {}", policy.min_credit_score),
        format!("Income Criteria: {income}"),
        format!("Max DTI Allowed: {}%", policy.max_dti.normalize()),
        format!("Max Tenure Available: {} months", policy.max_tenure_months),
        format!("Interest Rate: {}%", policy.interest_rate.normalize()),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
