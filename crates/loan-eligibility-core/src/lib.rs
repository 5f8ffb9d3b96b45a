pub mod emi;
pub mod error;
pub mod types;

#[cfg(feature = "eligibility")]
pub mod eligibility;

#[cfg(feature = "decision")]
pub mod decision;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "report")]
pub mod report;

pub use emi::compute_emi;
pub use error::LoanError;
pub use types::*;

#[cfg(feature = "eligibility")]
pub use eligibility::evaluate_eligibility;

#[cfg(feature = "decision")]
pub use decision::{recommend_loan, rescale_loan};

/// Standard result type for all loan-eligibility operations
pub type LoanResult<T> = Result<T, LoanError>;
