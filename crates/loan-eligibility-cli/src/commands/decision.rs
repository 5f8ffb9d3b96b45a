use clap::Args;
use serde_json::Value;

use loan_eligibility_core::decision::{recommend_loan, DecisionInput};
use loan_eligibility_core::report::render_markdown_report;

use crate::commands::eligibility::{ApplicantArgs, PolicyArgs};
use crate::input;

// Arguments for a full loan decision; also flattened into the report command.
#[derive(Args)]
pub struct DecisionArgs {
    /// Path to JSON decision input ({ applicant, policy, requested_tenure_months })
    #[arg(long)]
    pub input: Option<String>,

    /// Requested tenure in months (defaults to the policy maximum)
    #[arg(long)]
    pub tenure: Option<u32>,

    #[command(flatten)]
    pub applicant: ApplicantArgs,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

/// Arguments for the markdown decision report
#[derive(Args)]
pub struct ReportArgs {
    /// Applicant name shown in the report header
    #[arg(long, default_value = "Applicant")]
    pub name: String,

    #[command(flatten)]
    pub decision: DecisionArgs,
}

impl DecisionArgs {
    fn into_input(self) -> Result<DecisionInput, Box<dyn std::error::Error>> {
        Ok(DecisionInput {
            applicant: self.applicant.into_profile()?,
            policy: self.policy.into_thresholds()?,
            requested_tenure_months: self.tenure,
        })
    }
}

/// `--tenure` wins over any tenure carried in the JSON input.
fn load_decision_input(args: DecisionArgs) -> Result<DecisionInput, Box<dyn std::error::Error>> {
    let tenure = args.tenure;
    let mut decision_input: DecisionInput = match input::load_json(args.input.as_deref())? {
        Some(decision_input) => decision_input,
        None => args.into_input()?,
    };
    if tenure.is_some() {
        decision_input.requested_tenure_months = tenure;
    }
    Ok(decision_input)
}

pub fn run_decision(args: DecisionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let decision_input = load_decision_input(args)?;
    let result = recommend_loan(&decision_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Render the decision as markdown. Bypasses the structured output formats.
pub fn run_report(args: ReportArgs) -> Result<String, Box<dyn std::error::Error>> {
    let decision_input = load_decision_input(args.decision)?;
    let output = recommend_loan(&decision_input)?;
    Ok(render_markdown_report(
        &args.name,
        &output.result,
        &decision_input.policy,
    ))
}
