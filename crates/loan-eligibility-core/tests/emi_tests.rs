use loan_eligibility_core::emi::{compute_emi, total_interest};
use loan_eligibility_core::LoanError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_emi_reference_home_loan() {
    // 10 lakh over 20 years at 8.5%
    let emi = compute_emi(dec!(1_000_000), dec!(8.5), 240).unwrap();
    assert_eq!(emi, dec!(8678.23));
}

#[test]
fn test_emi_zero_rate_equals_principal_over_tenure() {
    for (principal, tenure) in [(dec!(120_000), 12u32), (dec!(1_000), 7), (dec!(0), 24)] {
        let emi = compute_emi(principal, Decimal::ZERO, tenure).unwrap();
        assert_eq!(emi, principal / Decimal::from(tenure));
    }
}

#[test]
fn test_emi_increases_with_rate() {
    let low = compute_emi(dec!(2_000_000), dec!(7), 180).unwrap();
    let high = compute_emi(dec!(2_000_000), dec!(11), 180).unwrap();
    assert!(high > low);
}

#[test]
fn test_emi_decreases_with_tenure() {
    let short = compute_emi(dec!(2_000_000), dec!(9), 120).unwrap();
    let long = compute_emi(dec!(2_000_000), dec!(9), 300).unwrap();
    assert!(long < short);
}

#[test]
fn test_emi_has_currency_precision() {
    let emi = compute_emi(dec!(333_333), dec!(10.75), 97).unwrap();
    assert!(emi.scale() <= 2);
}

#[test]
fn test_total_interest_positive_for_positive_rate() {
    let interest = total_interest(dec!(1_000_000), dec!(8.5), 240).unwrap();
    // 8678.23 * 240 - 1,000,000
    assert_eq!(interest, dec!(1_082_775.2));
}

#[test]
fn test_emi_errors() {
    assert!(matches!(
        compute_emi(dec!(10_000), dec!(8), 0),
        Err(LoanError::InvalidTenure { months: 0, .. })
    ));
    assert!(matches!(
        compute_emi(dec!(-10_000), dec!(8), 12),
        Err(LoanError::InvalidInput { .. })
    ));
    assert!(matches!(
        compute_emi(dec!(10_000), dec!(-8), 12),
        Err(LoanError::InvalidInput { .. })
    ));
}

#[test]
fn test_emi_out_of_range_compounding_returns_error() {
    // 10% a month for 100 years overflows (1 + r)^N.
    assert!(compute_emi(dec!(1_000_000), dec!(120), 1200).is_err());
    assert!(total_interest(dec!(1_000_000), dec!(120), 1200).is_err());
}
