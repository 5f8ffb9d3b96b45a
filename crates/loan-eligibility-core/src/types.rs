use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Ratios expressed as decimals (0.7 = 70%). Used for LTV limits and shares.
pub type Rate = Decimal;

/// Percentages in whole units (8.5 = 8.5%). Interest rates and DTI figures
/// cross the policy boundary in this form, so they stay in it.
pub type Percent = Decimal;

/// Loan category. Closed set; secured categories require a declared asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanCategory {
    #[default]
    Home,
    Car,
    Personal,
}

impl LoanCategory {
    /// Home and car loans are collateralised by the declared asset.
    pub fn is_secured(self) -> bool {
        matches!(self, LoanCategory::Home | LoanCategory::Car)
    }

    pub fn label(self) -> &'static str {
        match self {
            LoanCategory::Home => "home",
            LoanCategory::Car => "car",
            LoanCategory::Personal => "personal",
        }
    }
}

impl std::fmt::Display for LoanCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for LoanCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(LoanCategory::Home),
            "car" => Ok(LoanCategory::Car),
            "personal" => Ok(LoanCategory::Personal),
            other => Err(format!(
                "unknown loan category '{other}' (expected home, car or personal)"
            )),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing_is_case_insensitive() {
        assert_eq!("Home".parse::<LoanCategory>().unwrap(), LoanCategory::Home);
        assert_eq!(" car ".parse::<LoanCategory>().unwrap(), LoanCategory::Car);
        assert!("boat".parse::<LoanCategory>().is_err());
    }

    #[test]
    fn test_secured_categories() {
        assert!(LoanCategory::Home.is_secured());
        assert!(LoanCategory::Car.is_secured());
        assert!(!LoanCategory::Personal.is_secured());
    }

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&LoanCategory::Personal).unwrap();
        assert_eq!(json, "\"personal\"");
        let back: LoanCategory = serde_json::from_str("\"car\"").unwrap();
        assert_eq!(back, LoanCategory::Car);
    }
}
