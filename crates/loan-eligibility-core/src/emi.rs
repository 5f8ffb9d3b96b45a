use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::LoanError;
use crate::types::{Money, Percent, Rate};
use crate::LoanResult;

/// Currency precision for installment amounts.
pub const CURRENCY_DP: u32 = 2;

/// Equated Monthly Installment for a level-pay loan.
///
/// `annual_rate_pct` is a percentage (8.5 = 8.5% p.a.). A zero rate falls back
/// to straight-line amortisation `P / N`, which is returned unrounded; the
/// annuity branch is rounded to currency precision.
pub fn compute_emi(principal: Money, annual_rate_pct: Percent, tenure_months: u32) -> LoanResult<Money> {
    validate_tenure(tenure_months)?;
    if principal < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "principal".into(),
            reason: "Principal cannot be negative".into(),
        });
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }

    let r = monthly_rate(annual_rate_pct);
    let n = Decimal::from(tenure_months);

    if r.is_zero() {
        return Ok(principal / n);
    }

    let factor = checked_pow(Decimal::ONE + r, tenure_months).ok_or_else(|| LoanError::InvalidInput {
        field: "tenure_months".into(),
        reason: format!(
            "Compounding {annual_rate_pct}% p.a. over {tenure_months} months exceeds decimal range"
        ),
    })?;
    let denom = factor - Decimal::ONE;
    if denom.is_zero() {
        // Rate too small to register at 28 digits; indistinguishable from zero.
        return Ok(principal / n);
    }

    // factor / denom tends to 1 for long tenures, so dividing first keeps the
    // product within range.
    let emi = factor
        .checked_div(denom)
        .and_then(|ratio| ratio.checked_mul(r))
        .and_then(|per_unit| per_unit.checked_mul(principal))
        .ok_or_else(|| LoanError::InvalidInput {
            field: "principal".into(),
            reason: format!("Installment on {principal} exceeds decimal range"),
        })?;

    Ok(round_currency(emi))
}

/// Total interest paid over the life of the loan: `EMI * N - P`, floored at 0.
pub fn total_interest(principal: Money, annual_rate_pct: Percent, tenure_months: u32) -> LoanResult<Money> {
    let emi = compute_emi(principal, annual_rate_pct, tenure_months)?;
    let paid = emi
        .checked_mul(Decimal::from(tenure_months))
        .ok_or_else(|| LoanError::InvalidInput {
            field: "principal".into(),
            reason: format!("Total repayment on {principal} exceeds decimal range"),
        })?;
    Ok((paid - principal).max(Decimal::ZERO))
}

/// Monthly periodic rate as a decimal: `R / 12 / 100`.
pub fn monthly_rate(annual_rate_pct: Percent) -> Rate {
    annual_rate_pct / dec!(12) / dec!(100)
}

/// Round half away from zero to currency precision.
pub fn round_currency(amount: Money) -> Money {
    amount.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

pub(crate) fn validate_tenure(tenure_months: u32) -> LoanResult<()> {
    if tenure_months == 0 {
        return Err(LoanError::InvalidTenure {
            months: tenure_months,
            reason: "Tenure must be at least one month".into(),
        });
    }
    Ok(())
}

/// base^n by repeated squaring. `None` once an intermediate overflows.
fn checked_pow(base: Decimal, n: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    let mut square = base;
    let mut exp = n;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.checked_mul(square)?;
        }
        exp >>= 1;
        if exp > 0 {
            square = square.checked_mul(square)?;
        }
    }
    Some(result)
}
