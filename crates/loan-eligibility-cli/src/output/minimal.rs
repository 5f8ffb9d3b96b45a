use serde_json::Value;

use super::{result_of, scalar_text};

/// Headline fields, most specific first. A decision answers with its
/// recommended loan, an eligibility screen with its cap, an EMI query with
/// the installment.
const PRIORITY_KEYS: [&str; 5] = ["recommended_loan", "max_loan", "emi", "total_interest", "dti"];

/// Print just the key answer value from the output.
///
/// Rejections print the first reason instead of a zero amount.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(result_of(value)));
}

fn minimal_line(result: &Value) -> String {
    let Value::Object(map) = result else {
        return scalar_text(result);
    };

    let rejected = matches!(map.get("approved"), Some(Value::Bool(false)))
        || matches!(map.get("eligible"), Some(Value::Bool(false)));
    if rejected {
        let reason = map
            .get("reasons")
            .and_then(Value::as_array)
            .and_then(|r| r.first())
            .map(scalar_text)
            .unwrap_or_else(|| "no reason given".to_string());
        return format!("rejected: {}", reason);
    }

    for key in PRIORITY_KEYS {
        if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
            return scalar_text(val);
        }
    }

    match map.iter().next() {
        Some((key, val)) => format!("{}: {}", key, scalar_text(val)),
        None => String::new(),
    }
}
