use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_eligibility_core::decision::rescale_loan;
use loan_eligibility_core::emi::{compute_emi, total_interest};

/// Arguments for EMI calculation
#[derive(Args)]
pub struct EmiArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent (8.5 = 8.5%)
    #[arg(long)]
    pub rate: Decimal,

    /// Tenure in months
    #[arg(long, alias = "months")]
    pub tenure: u32,
}

/// Arguments for DTI rescaling
#[derive(Args)]
pub struct RescaleArgs {
    /// Policy-capped loan amount before DTI adjustment
    #[arg(long)]
    pub max_loan: Decimal,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Decimal,

    /// Tenure in months
    #[arg(long, alias = "months")]
    pub tenure: u32,

    /// Existing monthly debt service
    #[arg(long, default_value = "0")]
    pub existing_debt: Decimal,

    /// Gross monthly income
    #[arg(long)]
    pub income: Decimal,

    /// Maximum debt-to-income in percent
    #[arg(long)]
    pub max_dti: Decimal,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let emi = compute_emi(args.principal, args.rate, args.tenure)?;
    let interest = total_interest(args.principal, args.rate, args.tenure)?;

    Ok(serde_json::json!({
        "result": {
            "emi": emi,
            "total_interest": interest,
            "total_payment": args.principal + interest,
            "tenure_months": args.tenure,
        },
        "methodology": "Level-pay annuity (monthly compounding)",
    }))
}

pub fn run_rescale(args: RescaleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let outcome = rescale_loan(
        args.max_loan,
        args.rate,
        args.tenure,
        args.existing_debt,
        args.income,
        args.max_dti,
    )?;
    Ok(serde_json::json!({
        "result": outcome,
        "methodology": "Single-pass proportional DTI rescale",
    }))
}
