pub mod decision;
pub mod eligibility;
pub mod emi;
pub mod schedule;
