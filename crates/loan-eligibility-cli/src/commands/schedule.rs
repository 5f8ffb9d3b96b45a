use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_eligibility_core::amortization::{amortization_schedule, AmortizationInput};

use crate::input;

/// Arguments for an amortisation schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long, alias = "months")]
    pub tenure: Option<u32>,

    /// Due date of the first installment (YYYY-MM-DD)
    #[arg(long)]
    pub first_payment_date: Option<String>,
}

impl ScheduleArgs {
    fn into_input(self) -> Result<AmortizationInput, Box<dyn std::error::Error>> {
        let schedule_input = serde_json::from_value(serde_json::json!({
            "principal": self.principal
                .ok_or("--principal is required (or provide --input)")?,
            "annual_rate_pct": self.rate
                .ok_or("--rate is required (or provide --input)")?,
            "tenure_months": self.tenure
                .ok_or("--tenure is required (or provide --input)")?,
            "first_payment_date": self.first_payment_date,
        }))
        .map_err(|e| format!("Invalid schedule arguments: {e}"))?;
        Ok(schedule_input)
    }
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input: AmortizationInput = match input::load_json(args.input.as_deref())? {
        Some(schedule_input) => schedule_input,
        None => args.into_input()?,
    };

    let result = amortization_schedule(&schedule_input)?;
    Ok(serde_json::to_value(result)?)
}
