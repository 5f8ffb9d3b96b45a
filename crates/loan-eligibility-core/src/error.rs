use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid tenure of {months} months: {reason}")]
    InvalidTenure { months: u32, reason: String },

    #[error("Policy infeasible: {reason} (allowed EMI: {allowed_emi})")]
    PolicyInfeasible { allowed_emi: Decimal, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanError {
    fn from(e: serde_json::Error) -> Self {
        LoanError::SerializationError(e.to_string())
    }
}
