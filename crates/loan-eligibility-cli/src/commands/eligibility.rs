use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_eligibility_core::eligibility::{
    evaluate_eligibility, ApplicantProfile, LtvLimits, PolicyThresholds,
};
use loan_eligibility_core::LoanCategory;

use crate::input;

// Applicant fields accepted as flags when no JSON input is given.
#[derive(Args)]
pub struct ApplicantArgs {
    /// Gross monthly income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Existing monthly debt service
    #[arg(long, default_value = "0")]
    pub existing_debt: Decimal,

    /// Credit bureau score
    #[arg(long, alias = "cibil")]
    pub credit_score: Option<u32>,

    /// Declared property or vehicle value (secured loans)
    #[arg(long)]
    pub asset_value: Option<Decimal>,

    /// Loan category: home, car or personal
    #[arg(long)]
    pub category: Option<LoanCategory>,
}

// Policy thresholds, from a JSON/YAML file or individual flags.
#[derive(Args)]
pub struct PolicyArgs {
    /// Path to a policy file (.json, .yaml or .yml)
    #[arg(long)]
    pub policy: Option<String>,

    /// Minimum credit score
    #[arg(long, alias = "min-cibil")]
    pub min_credit_score: Option<u32>,

    /// Maximum debt-to-income in percent
    #[arg(long)]
    pub max_dti: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Minimum tenure in months
    #[arg(long, default_value_t = 1)]
    pub min_tenure: u32,

    /// Maximum tenure in months
    #[arg(long)]
    pub max_tenure: Option<u32>,

    /// Description of the minimum qualifying income
    #[arg(long, default_value = "")]
    pub income_threshold: String,
}

/// Arguments for an eligibility screen
#[derive(Args)]
pub struct EligibilityArgs {
    /// Path to JSON applicant file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub applicant: ApplicantArgs,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

impl ApplicantArgs {
    pub fn into_profile(self) -> Result<ApplicantProfile, Box<dyn std::error::Error>> {
        Ok(ApplicantProfile {
            monthly_income: self
                .income
                .ok_or("--income is required (or provide --input)")?,
            existing_monthly_debt: self.existing_debt,
            credit_score: self
                .credit_score
                .ok_or("--credit-score is required (or provide --input)")?,
            asset_value: self.asset_value,
            category: self
                .category
                .ok_or("--category is required (or provide --input)")?,
            income_assessment: None,
        })
    }
}

impl PolicyArgs {
    pub fn into_thresholds(self) -> Result<PolicyThresholds, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.policy {
            tracing::debug!(path = %path, "loading policy thresholds");
            return input::file::read_config(path);
        }
        Ok(PolicyThresholds {
            min_credit_score: self
                .min_credit_score
                .ok_or("--min-credit-score is required (or provide --policy)")?,
            max_dti: self
                .max_dti
                .ok_or("--max-dti is required (or provide --policy)")?,
            interest_rate: self
                .rate
                .ok_or("--rate is required (or provide --policy)")?,
            min_tenure_months: self.min_tenure,
            max_tenure_months: self
                .max_tenure
                .ok_or("--max-tenure is required (or provide --policy)")?,
            income_threshold: self.income_threshold,
            ltv: LtvLimits::default(),
        })
    }
}

pub fn run_eligibility(args: EligibilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let applicant: ApplicantProfile = match input::load_json(args.input.as_deref())? {
        Some(applicant) => applicant,
        None => args.applicant.into_profile()?,
    };
    let thresholds = args.policy.into_thresholds()?;

    let result = evaluate_eligibility(&applicant, &thresholds)?;
    Ok(serde_json::json!({
        "result": result,
        "methodology": "Ordered policy screen (credit, DTI, asset, income)",
    }))
}
