//! Applicant screening against externally supplied policy thresholds.
//!
//! The policy values themselves (minimum credit score, DTI ceiling, rate,
//! tenure window) arrive from an upstream extraction step and are taken as
//! given. This module only applies them.

pub mod evaluator;
pub mod policy;
pub mod profile;

pub use evaluator::{evaluate_eligibility, EligibilityCheck, EligibilityResult};
pub use policy::{LtvLimits, PolicyThresholds};
pub use profile::{ApplicantProfile, IncomeAssessment};
