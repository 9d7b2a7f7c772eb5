use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::error::SalaryAdvanceError;
use crate::types::*;
use crate::SalaryAdvanceResult;

/// Annuity denominators closer to zero than this are treated as degenerate.
const DENOMINATOR_EPSILON: Decimal = dec!(0.000000001);

/// Input for a fixed-rate, fully amortising loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: Money,
    /// Annual rate as a percentage (5.0 = 5%).
    pub annual_rate_percent: Decimal,
    pub term_months: u32,
}

/// A single month in the amortisation schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    pub month: u32,
    pub starting_balance: Money,
    pub interest_payment: Money,
    pub principal_payment: Money,
    pub period_payment: Money,
    pub ending_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanOutput {
    pub period_payment: Money,
    pub total_interest_paid: Money,
    pub total_repayable: Money,
    pub schedule: Vec<AmortizationEntry>,
}

/// Convert an annual percentage into a monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: Decimal) -> Rate {
    annual_rate_percent / dec!(100) / dec!(12)
}

/// Level monthly payment for a fixed-rate loan, rounded to cents.
///
/// `P * i * (1+i)^n / ((1+i)^n - 1)` with `i` the monthly rate. A zero rate
/// falls back to straight-line repayment `P / n`.
pub fn compute_monthly_payment(
    principal: Money,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> SalaryAdvanceResult<Money> {
    validate_terms(principal, annual_rate_percent, term_months)?;
    let payment = level_payment(principal, monthly_rate(annual_rate_percent), term_months)?;
    Ok(round_money(payment))
}

fn level_payment(principal: Money, rate: Rate, term_months: u32) -> SalaryAdvanceResult<Money> {
    let nper = Decimal::from(term_months);
    if rate.is_zero() {
        return Ok(principal / nper);
    }

    let growth = (Decimal::ONE + rate)
        .checked_powu(u64::from(term_months))
        .ok_or_else(|| {
            SalaryAdvanceError::ComputationError(format!(
                "compound factor (1 + {rate})^{term_months} exceeds decimal range"
            ))
        })?;

    // Checked before dividing: a near-zero denominator yields a meaningless payment.
    let denominator = growth - Decimal::ONE;
    if denominator.abs() < DENOMINATOR_EPSILON {
        warn!(%rate, term_months, %denominator, "degenerate annuity denominator");
        return Err(SalaryAdvanceError::ComputationError(format!(
            "annuity denominator {denominator} is effectively zero for monthly rate {rate} over {term_months} months"
        )));
    }

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(growth))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| {
            SalaryAdvanceError::ComputationError("monthly payment exceeds decimal range".into())
        })
}

/// Build the month-by-month amortisation schedule.
///
/// Every figure is rounded to cents. The final month repays the exact
/// remaining balance so that per-period rounding never leaves a residual,
/// and its ending balance is forced to zero. When the rounded level payment
/// over-amortises, the month that clears the balance pays only what is left
/// and the months after it carry zero payments.
pub fn generate_schedule(
    input: &LoanInput,
) -> SalaryAdvanceResult<ComputationOutput<LoanOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let output = build_schedule(input)?;
    if let Some(warning) = early_payoff_warning(&output) {
        warn!(principal = %input.principal, term = input.term_months, "{warning}");
        warnings.push(warning);
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Amortisation Schedule",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_percent": input.annual_rate_percent.to_string(),
            "monthly_rate": monthly_rate(input.annual_rate_percent).to_string(),
            "term_months": input.term_months,
        }),
        warnings,
        elapsed,
        output,
    ))
}

pub(crate) fn build_schedule(input: &LoanInput) -> SalaryAdvanceResult<LoanOutput> {
    let payment =
        compute_monthly_payment(input.principal, input.annual_rate_percent, input.term_months)?;
    let rate = monthly_rate(input.annual_rate_percent);
    let term = input.term_months;

    debug!(principal = %input.principal, %rate, term, %payment, "building schedule");

    let mut schedule = Vec::with_capacity(term as usize);
    let mut balance = input.principal;
    let mut total_interest = Decimal::ZERO;

    for month in 1..=term {
        let is_final = month == term;

        let interest = round_money(balance * rate);
        let scheduled = round_money(payment - interest);
        // A level payment rounded up to the cent can clear the balance early.
        let principal_payment = if is_final {
            balance
        } else {
            scheduled.min(balance)
        };
        let short_period = is_final || principal_payment != scheduled;

        let ending = round_money(balance - principal_payment);
        check_period(month, term, balance, ending)?;

        total_interest += interest;
        schedule.push(AmortizationEntry {
            month,
            starting_balance: round_money(balance),
            interest_payment: interest,
            principal_payment,
            period_payment: if short_period {
                interest + principal_payment
            } else {
                payment
            },
            ending_balance: ending,
        });

        balance = ending;
    }

    if let Some(last) = schedule.last_mut() {
        last.ending_balance = Decimal::ZERO;
    }

    let total_interest_paid = round_money(total_interest);
    Ok(LoanOutput {
        period_payment: payment,
        total_interest_paid,
        total_repayable: round_money(input.principal + total_interest_paid),
        schedule,
    })
}

/// A balance may only shrink, and never below zero.
fn check_period(month: u32, term: u32, balance: Money, ending: Money) -> SalaryAdvanceResult<()> {
    if ending < Decimal::ZERO {
        return Err(SalaryAdvanceError::InternalError(format!(
            "negative balance {ending} at month {month} of {term}"
        )));
    }
    if ending > balance {
        return Err(SalaryAdvanceError::InternalError(format!(
            "balance increased from {balance} to {ending} at month {month}"
        )));
    }
    Ok(())
}

/// Month at which the balance reached zero ahead of the final month, if any.
pub(crate) fn early_payoff_month(output: &LoanOutput) -> Option<u32> {
    let term = output.schedule.len() as u32;
    output
        .schedule
        .iter()
        .find(|e| e.month < term && e.ending_balance.is_zero())
        .map(|e| e.month)
}

pub(crate) fn early_payoff_warning(output: &LoanOutput) -> Option<String> {
    early_payoff_month(output).map(|month| {
        format!(
            "Rounded level payment repays the loan at month {month} of {}; later months carry no payment",
            output.schedule.len()
        )
    })
}

fn validate_terms(
    principal: Money,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> SalaryAdvanceResult<()> {
    if principal <= Decimal::ZERO {
        return Err(SalaryAdvanceError::invalid(
            "principal",
            "Loan principal must be positive",
        ));
    }
    ensure_cents("principal", principal)?;
    if annual_rate_percent < Decimal::ZERO {
        return Err(SalaryAdvanceError::invalid(
            "annual_rate_percent",
            "Interest rate cannot be negative",
        ));
    }
    if term_months == 0 {
        return Err(SalaryAdvanceError::invalid(
            "term_months",
            "Term must be at least 1 month",
        ));
    }
    Ok(())
}
