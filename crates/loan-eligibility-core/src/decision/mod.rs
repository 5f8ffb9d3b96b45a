//! Turning an eligibility verdict into a concrete loan offer.

pub mod recommend;
pub mod rescale;

pub use recommend::{recommend_loan, DecisionInput, LoanDecision};
pub use rescale::{rescale_loan, RescaleOutcome};
