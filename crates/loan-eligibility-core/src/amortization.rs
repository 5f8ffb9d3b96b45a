//! Level-pay amortisation schedules built on the EMI calculator.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::emi::{compute_emi, monthly_rate, round_currency};
use crate::error::LoanError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::LoanResult;

/// Longest schedule that will be tabulated (100 years of monthly rows).
pub const MAX_SCHEDULE_MONTHS: u32 = 1200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationInput {
    pub principal: Money,
    pub annual_rate_pct: Percent,
    pub tenure_months: u32,
    /// Due date of the first installment; later ones fall monthly after it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub period: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub opening_balance: Money,
    pub installment: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub emi: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    pub rows: Vec<AmortizationRow>,
}

/// Build the month-by-month repayment table. Interest is rounded to currency
/// precision each month and the final installment absorbs the residual so
/// the loan closes at exactly zero.
pub fn amortization_schedule(
    input: &AmortizationInput,
) -> LoanResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.tenure_months > MAX_SCHEDULE_MONTHS {
        return Err(LoanError::InvalidTenure {
            months: input.tenure_months,
            reason: format!("Schedules are limited to {MAX_SCHEDULE_MONTHS} monthly rows"),
        });
    }

    let emi = compute_emi(input.principal, input.annual_rate_pct, input.tenure_months)?;
    let installment = round_currency(emi);
    let r = monthly_rate(input.annual_rate_pct);

    let mut rows = Vec::with_capacity(input.tenure_months as usize);
    let mut balance = input.principal;
    let mut total_paid = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;

    for period in 1..=input.tenure_months {
        let due_date = match input.first_payment_date {
            Some(first) => Some(first.checked_add_months(Months::new(period - 1)).ok_or_else(|| {
                LoanError::InvalidInput {
                    field: "first_payment_date".into(),
                    reason: format!("Installment {period} falls outside the supported date range"),
                }
            })?),
            None => None,
        };

        let interest = round_currency(balance * r);
        let (payment, principal) = if period == input.tenure_months {
            (balance + interest, balance)
        } else {
            let principal = (installment - interest).min(balance).max(Decimal::ZERO);
            (principal + interest, principal)
        };
        let closing = balance - principal;

        rows.push(AmortizationRow {
            period,
            due_date,
            opening_balance: balance,
            installment: payment,
            interest,
            principal,
            closing_balance: closing,
        });

        total_paid += payment;
        total_interest += interest;
        balance = closing;
    }

    if let Some(last) = rows.last() {
        let drift = (last.installment - installment).abs();
        if drift > Decimal::ONE {
            warnings.push(format!(
                "Final installment differs from EMI by {drift} due to rounding"
            ));
        }
    }

    let output = AmortizationSchedule {
        emi,
        total_paid,
        total_interest,
        rows,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-pay amortisation (monthly compounding)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input() -> AmortizationInput {
        AmortizationInput {
            principal: dec!(500_000),
            annual_rate_pct: dec!(12),
            tenure_months: 60,
            first_payment_date: None,
        }
    }

    #[test]
    fn test_schedule_closes_at_zero() {
        let out = amortization_schedule(&input()).unwrap().result;
        assert_eq!(out.rows.len(), 60);
        assert_eq!(out.rows.last().unwrap().closing_balance, Decimal::ZERO);
        let principal_sum: Decimal = out.rows.iter().map(|r| r.principal).sum();
        assert_eq!(principal_sum, dec!(500_000));
        assert_eq!(out.total_paid, out.total_interest + dec!(500_000));
    }

    #[test]
    fn test_first_row_splits_interest_and_principal() {
        let out = amortization_schedule(&input()).unwrap().result;
        let first = &out.rows[0];
        // 1% of 500,000
        assert_eq!(first.interest, dec!(5_000));
        assert_eq!(first.installment, dec!(11122.22));
        assert_eq!(first.principal, dec!(6122.22));
    }

    #[test]
    fn test_due_dates_roll_monthly_and_clamp_month_end() {
        let mut i = input();
        i.tenure_months = 3;
        i.first_payment_date = NaiveDate::from_ymd_opt(2025, 1, 31);
        let out = amortization_schedule(&i).unwrap().result;
        let dates: Vec<_> = out.rows.iter().map(|r| r.due_date.unwrap()).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
                NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            ]
        );
    }

    #[test]
    fn test_zero_rate_schedule_is_straight_line() {
        let i = AmortizationInput {
            principal: dec!(1200),
            annual_rate_pct: Decimal::ZERO,
            tenure_months: 12,
            first_payment_date: None,
        };
        let out = amortization_schedule(&i).unwrap().result;
        assert!(out.rows.iter().all(|r| r.installment == dec!(100)));
        assert_eq!(out.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_tenure_beyond_schedule_limit_rejected() {
        let i = AmortizationInput {
            principal: dec!(1200),
            annual_rate_pct: Decimal::ZERO,
            tenure_months: u32::MAX,
            first_payment_date: None,
        };
        let err = amortization_schedule(&i).unwrap_err();
        assert!(matches!(err, LoanError::InvalidTenure { months: u32::MAX, .. }));

        let mut at_limit = input();
        at_limit.tenure_months = MAX_SCHEDULE_MONTHS;
        let out = amortization_schedule(&at_limit).unwrap().result;
        assert_eq!(out.rows.len(), MAX_SCHEDULE_MONTHS as usize);
    }
}
