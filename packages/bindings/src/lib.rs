use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use loan_eligibility_core::amortization::{self, AmortizationInput};
use loan_eligibility_core::decision::{self, DecisionInput};
use loan_eligibility_core::eligibility::{self, ApplicantProfile, PolicyThresholds};
use loan_eligibility_core::{emi, report};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Request shapes for functions whose core API takes positional arguments
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct EmiRequest {
    principal: Decimal,
    annual_rate_pct: Decimal,
    tenure_months: u32,
}

#[derive(Deserialize)]
struct EligibilityRequest {
    applicant: ApplicantProfile,
    policy: PolicyThresholds,
}

#[derive(Deserialize)]
struct RescaleRequest {
    max_loan: Decimal,
    annual_rate_pct: Decimal,
    tenure_months: u32,
    #[serde(default)]
    existing_debt: Decimal,
    income: Decimal,
    max_dti_pct: Decimal,
}

// ---------------------------------------------------------------------------
// EMI
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_emi(input_json: String) -> NapiResult<String> {
    let req: EmiRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let value = emi::compute_emi(req.principal, req.annual_rate_pct, req.tenure_months)
        .map_err(to_napi_error)?;
    serde_json::to_string(&serde_json::json!({ "emi": value })).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: AmortizationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization::amortization_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Eligibility and decision
// ---------------------------------------------------------------------------

#[napi]
pub fn evaluate_eligibility(input_json: String) -> NapiResult<String> {
    let req: EligibilityRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        eligibility::evaluate_eligibility(&req.applicant, &req.policy).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn rescale_loan(input_json: String) -> NapiResult<String> {
    let req: RescaleRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = decision::rescale_loan(
        req.max_loan,
        req.annual_rate_pct,
        req.tenure_months,
        req.existing_debt,
        req.income,
        req.max_dti_pct,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn recommend_loan(input_json: String) -> NapiResult<String> {
    let input: DecisionInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = decision::recommend_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Markdown report for a decision input. Returns the markdown text, not JSON.
#[napi]
pub fn render_report(applicant_name: String, input_json: String) -> NapiResult<String> {
    let input: DecisionInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = decision::recommend_loan(&input).map_err(to_napi_error)?;
    Ok(report::render_markdown_report(
        &applicant_name,
        &output.result,
        &input.policy,
    ))
}
