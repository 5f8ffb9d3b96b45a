use loan_eligibility_core::decision::{recommend_loan, rescale_loan, DecisionInput};
use loan_eligibility_core::eligibility::{ApplicantProfile, IncomeAssessment, LtvLimits, PolicyThresholds};
use loan_eligibility_core::{LoanCategory, LoanError};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const DTI_TOL: Decimal = dec!(0.01);

fn policy() -> PolicyThresholds {
    PolicyThresholds {
        min_credit_score: 700,
        max_dti: dec!(50),
        interest_rate: dec!(8.5),
        min_tenure_months: 12,
        max_tenure_months: 240,
        income_threshold: "Net monthly income of at least 30,000".into(),
        ltv: LtvLimits::default(),
    }
}

fn applicant(monthly_income: Decimal, existing_monthly_debt: Decimal) -> ApplicantProfile {
    ApplicantProfile {
        monthly_income,
        existing_monthly_debt,
        credit_score: 760,
        asset_value: Some(dec!(5_000_000)),
        category: LoanCategory::Home,
        income_assessment: None,
    }
}

// ===========================================================================
// rescale_loan
// ===========================================================================

#[test]
fn test_rescale_scenario_brings_dti_under_ceiling() {
    // EMI on 3.5M at 8.5% over 240 months is 30,373.81; with 10k existing
    // debt on 60k income the total DTI is ~67.3%.
    let out = rescale_loan(dec!(3_500_000), dec!(8.5), 240, dec!(10_000), dec!(60_000), dec!(50)).unwrap();

    assert!(out.was_rescaled);
    assert!(out.recommended_loan < dec!(3_500_000));
    assert!(out.dti <= dec!(50) + DTI_TOL, "dti = {}", out.dti);
    assert_eq!(out.emi, dec!(20_000.00));
}

#[test]
fn test_rescale_not_needed_for_high_income() {
    let out = rescale_loan(dec!(3_500_000), dec!(8.5), 240, dec!(10_000), dec!(100_000), dec!(50)).unwrap();

    assert!(!out.was_rescaled);
    assert_eq!(out.recommended_loan, dec!(3_500_000));
    assert!(out.dti <= dec!(50));
}

#[test]
fn test_rescale_never_increases_loan() {
    let cases = [
        (dec!(0), dec!(9), 12u32, dec!(0), dec!(10_000), dec!(40)),
        (dec!(750_000), dec!(0), 36, dec!(1_000), dec!(25_000), dec!(35)),
        (dec!(9_000_000), dec!(10.4), 300, dec!(45_000), dec!(150_000), dec!(55)),
        (dec!(1_250_000), dec!(7.2), 120, dec!(0), dec!(30_000), dec!(45)),
    ];
    for (max_loan, rate, tenure, debt, income, max_dti) in cases {
        let out = rescale_loan(max_loan, rate, tenure, debt, income, max_dti).unwrap();
        assert!(out.recommended_loan <= max_loan);
        assert!(out.dti <= max_dti + DTI_TOL, "dti {} over {}", out.dti, max_dti);
    }
}

#[test]
fn test_rescale_infeasible_when_debt_consumes_ceiling() {
    let err = rescale_loan(dec!(1_000_000), dec!(8.5), 240, dec!(25_000), dec!(50_000), dec!(50)).unwrap_err();
    assert!(matches!(err, LoanError::PolicyInfeasible { .. }));
}

#[test]
fn test_rescale_rejects_negative_inputs() {
    assert!(matches!(
        rescale_loan(dec!(-1), dec!(8.5), 240, dec!(0), dec!(50_000), dec!(50)),
        Err(LoanError::InvalidInput { .. })
    ));
    assert!(matches!(
        rescale_loan(dec!(1), dec!(8.5), 240, dec!(0), dec!(-50_000), dec!(50)),
        Err(LoanError::InvalidInput { .. })
    ));
}

// ===========================================================================
// recommend_loan
// ===========================================================================

#[test]
fn test_recommendation_within_policy_cap() {
    let input = DecisionInput {
        applicant: applicant(dec!(60_000), dec!(10_000)),
        policy: policy(),
        requested_tenure_months: None,
    };

    let out = recommend_loan(&input).unwrap();
    let d = &out.result;

    assert!(d.approved);
    assert_eq!(d.tenure_months, 240);
    assert!(d.recommended_loan <= d.policy_max_loan);
    assert!(d.dti <= dec!(50) + DTI_TOL);
    assert_eq!(
        d.next_steps,
        vec![
            "Sign loan agreement".to_string(),
            "Submit original KYC documents".to_string(),
            "Await disbursement".to_string(),
        ]
    );
    assert_eq!(out.methodology, "Policy eligibility screen with single-pass DTI rescale");
}

#[test]
fn test_recommendation_with_requested_tenure() {
    let input = DecisionInput {
        applicant: applicant(dec!(150_000), dec!(0)),
        policy: policy(),
        requested_tenure_months: Some(120),
    };

    let d = recommend_loan(&input).unwrap().result;

    assert_eq!(d.tenure_months, 120);
    assert!(d.emi_only_dti);
}

#[test]
fn test_infeasible_policy_surfaces_as_reason() {
    // DTI exactly at the ceiling passes screening but leaves no EMI headroom.
    let input = DecisionInput {
        applicant: applicant(dec!(40_000), dec!(20_000)),
        policy: policy(),
        requested_tenure_months: None,
    };

    let d = recommend_loan(&input).unwrap().result;

    assert!(!d.approved);
    assert_eq!(d.recommended_loan, Decimal::ZERO);
    assert_eq!(d.policy_max_loan, dec!(3_500_000));
    assert_eq!(d.reasons.len(), 1);
    assert!(d.reasons[0].contains("DTI ceiling"));
}

#[test]
fn test_income_veto_produces_rejection() {
    let mut profile = applicant(dec!(100_000), dec!(0));
    profile.income_assessment = Some(IncomeAssessment::Insufficient {
        reason: "self-employed income not verified".into(),
    });
    let input = DecisionInput {
        applicant: profile,
        policy: policy(),
        requested_tenure_months: None,
    };

    let d = recommend_loan(&input).unwrap().result;

    assert!(!d.approved);
    assert_eq!(d.policy_max_loan, Decimal::ZERO);
    assert_eq!(d.applicable_rules[1], "Income Criteria: Net monthly income of at least 30,000");
    assert_eq!(d.next_steps[0], "Submit additional proof of income");
}

#[test]
fn test_decision_input_from_json() {
    let json = r#"{
        "applicant": {
            "monthly_income": "60000",
            "existing_monthly_debt": "10000",
            "cibil_score": 760,
            "asset_value": "5000000",
            "category": "home"
        },
        "policy": {
            "min_cibil": 700,
            "max_dti": "50",
            "interest_rate": "8.5",
            "max_tenure": 240
        }
    }"#;
    let input: DecisionInput = serde_json::from_str(json).unwrap();

    let d = recommend_loan(&input).unwrap().result;

    assert!(d.approved);
    assert!(d.was_rescaled);
}
