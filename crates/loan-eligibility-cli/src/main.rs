mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::decision::{DecisionArgs, ReportArgs};
use commands::eligibility::EligibilityArgs;
use commands::emi::{EmiArgs, RescaleArgs};
use commands::schedule::ScheduleArgs;

/// Loan eligibility, EMI and DTI calculations
#[derive(Parser)]
#[command(
    name = "loanctl",
    version,
    about = "Loan eligibility, EMI and DTI calculations",
    long_about = "Screens loan applicants against policy thresholds with decimal precision. \
                  Computes EMIs, loan-to-value caps and DTI-compliant loan amounts, and \
                  renders amortisation schedules and decision reports."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter used when RUST_LOG is unset (e.g. "debug", "loan_eligibility_core=info")
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the equated monthly installment for a loan
    Emi(EmiArgs),
    /// Screen an applicant against policy thresholds
    Eligibility(EligibilityArgs),
    /// Reduce a loan until its EMI fits under the DTI ceiling
    Rescale(RescaleArgs),
    /// Produce a full loan decision (eligibility, sizing, rules, next steps)
    Decision(DecisionArgs),
    /// Month-by-month amortisation schedule
    Schedule(ScheduleArgs),
    /// Render a markdown decision report
    Report(ReportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::emi::run_emi(args),
        Commands::Eligibility(args) => commands::eligibility::run_eligibility(args),
        Commands::Rescale(args) => commands::emi::run_rescale(args),
        Commands::Decision(args) => commands::decision::run_decision(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Report(args) => match commands::decision::run_report(args) {
            Ok(markdown) => {
                print!("{}", markdown);
                return;
            }
            Err(e) => Err(e),
        },
        Commands::Version => {
            println!("loanctl {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
