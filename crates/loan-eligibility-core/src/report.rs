//! Customer-facing markdown summary of a loan decision.

use rust_decimal::Decimal;
use std::fmt::Write;

use crate::decision::LoanDecision;
use crate::eligibility::PolicyThresholds;
use crate::emi::round_currency;
use crate::types::Money;

const FOOTER: &str = "**This report is system-generated based on current loan policies.**";

/// Render a decision as markdown: verdict details, the policy rules that were
/// applied and the applicant's next steps.
pub fn render_markdown_report(
    applicant_name: &str,
    decision: &LoanDecision,
    policy: &PolicyThresholds,
) -> String {
    let mut md = String::new();

    let _ = writeln!(md, "# Loan Report\n");
    let _ = writeln!(md, "**Applicant:** {applicant_name}  ");
    let _ = writeln!(md, "**Loan Type:** {}  ", decision.category);
    let _ = writeln!(
        md,
        "**Status:** {}\n",
        if decision.approved { "Approved" } else { "Not approved" }
    );
    md.push_str("---\n\n");

    if decision.approved {
        md.push_str("## Loan Details\n\n");
        let _ = writeln!(
            md,
            "- **Recommended Loan Amount:** {}",
            format_money(decision.recommended_loan)
        );
        if decision.was_rescaled {
            let _ = writeln!(
                md,
                "- **Policy Maximum (before DTI adjustment):** {}",
                format_money(decision.policy_max_loan)
            );
        }
        let _ = writeln!(md, "- **Tenure:** {} months", decision.tenure_months);
        let _ = writeln!(md, "- **Interest Rate:** {}%", policy.interest_rate.normalize());
        let _ = writeln!(md, "- **Recommended EMI:** {}", format_money(decision.emi));
        let label = if decision.emi_only_dti {
            "DTI (EMI only)"
        } else {
            "DTI (Debt-to-Income)"
        };
        let _ = writeln!(md, "- **{label}:** {:.2}%", decision.dti);
    } else {
        md.push_str("## Loan Rejection Details\n\n");
        for reason in &decision.reasons {
            let _ = writeln!(md, "- {reason}");
        }
    }

    md.push_str("\n---\n\n## Policy Rules Considered\n\n");
    for rule in &decision.applicable_rules {
        let _ = writeln!(md, "- {rule}");
    }

    let heading = if decision.approved { "Next Steps" } else { "Recommendation" };
    let _ = writeln!(md, "\n---\n\n## {heading}\n");
    for step in &decision.next_steps {
        let _ = writeln!(md, "- {step}");
    }

    let _ = write!(md, "\n---\n{FOOTER}\n");
    md
}

/// Currency amount with thousands separators and two decimals.
pub fn format_money(amount: Money) -> String {
    let rounded = round_currency(amount);
    let negative = rounded < Decimal::ZERO;
    let text = format!("{:.2}", rounded.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{grouped}.{frac}", if negative { "-" } else { "" })
}
