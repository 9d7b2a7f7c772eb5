use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::salary::validate_net_ratio;
use crate::{types::*, SalaryAdvanceError, SalaryAdvanceResult};

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// What the requested amount is compared against.
///
/// Written as `gross_salary` or `{ net_estimate: { net_ratio: "0.90" } }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CeilingBasis {
    /// The full gross salary.
    GrossSalary,
    /// A flat fraction of gross salary standing in for take-home pay.
    NetEstimate { net_ratio: Rate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancePolicy {
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub ceiling_basis: CeilingBasis,
    /// Fraction of the approved amount withheld as a fee.
    pub fee_rate: Rate,
}

impl AdvancePolicy {
    /// Ceiling at gross salary, 5% fee.
    pub fn standard() -> Self {
        AdvancePolicy {
            ceiling_basis: CeilingBasis::GrossSalary,
            fee_rate: dec!(0.05),
        }
    }

    /// Ceiling at 90% of gross salary, 15% fee.
    pub fn net_estimate() -> Self {
        AdvancePolicy {
            ceiling_basis: CeilingBasis::NetEstimate {
                net_ratio: dec!(0.90),
            },
            fee_rate: dec!(0.15),
        }
    }

    pub fn validate(&self) -> SalaryAdvanceResult<()> {
        if self.fee_rate < Decimal::ZERO || self.fee_rate >= Decimal::ONE {
            return Err(SalaryAdvanceError::invalid(
                "fee_rate",
                "Fee rate must be in [0, 1)",
            ));
        }
        if let CeilingBasis::NetEstimate { net_ratio } = self.ceiling_basis {
            validate_net_ratio(net_ratio)?;
        }
        Ok(())
    }

    /// Largest amount that may be requested against `gross_salary`.
    pub fn eligibility_ceiling(&self, gross_salary: Money) -> Money {
        match self.ceiling_basis {
            CeilingBasis::GrossSalary => gross_salary,
            CeilingBasis::NetEstimate { net_ratio } => round_money(gross_salary * net_ratio),
        }
    }
}

impl Default for AdvancePolicy {
    fn default() -> Self {
        AdvancePolicy::standard()
    }
}

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceInput {
    /// Gross pay for one pay period.
    pub gross_salary: Money,
    #[serde(default)]
    pub pay_frequency: PayFrequency,
    pub requested_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvanceOutput {
    pub eligible: bool,
    pub max_advance_amount: Money,
    pub approved_amount: Money,
    pub fee_amount: Money,
    pub net_payout: Money,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Decide whether a salary advance is allowed under `policy` and, if so,
/// what fee is withheld and what is paid out.
pub fn compute_advance(
    input: &AdvanceInput,
    policy: &AdvancePolicy,
) -> SalaryAdvanceResult<ComputationOutput<AdvanceOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;
    policy.validate()?;

    if input.pay_frequency != PayFrequency::Monthly {
        warnings.push(format!(
            "Ceiling applied to per-period gross salary; {} pay is not converted to a monthly figure",
            input.pay_frequency
        ));
    }

    let ceiling = policy.eligibility_ceiling(input.gross_salary);

    let output = if input.requested_amount > ceiling {
        debug!(
            requested = %input.requested_amount,
            %ceiling,
            "advance rejected: request above ceiling"
        );
        AdvanceOutput {
            eligible: false,
            max_advance_amount: ceiling,
            approved_amount: Decimal::ZERO,
            fee_amount: Decimal::ZERO,
            net_payout: Decimal::ZERO,
            message: rejection_message(&policy.ceiling_basis, ceiling),
        }
    } else {
        let approved = input.requested_amount;
        let fee = round_money(approved * policy.fee_rate);
        debug!(%approved, %fee, "advance approved");
        AdvanceOutput {
            eligible: true,
            max_advance_amount: ceiling,
            approved_amount: approved,
            fee_amount: fee,
            net_payout: approved - fee,
            message: "Salary advance approved.".into(),
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Salary Advance Eligibility",
        &serde_json::json!({
            "gross_salary": input.gross_salary.to_string(),
            "pay_frequency": input.pay_frequency,
            "requested_amount": input.requested_amount.to_string(),
            "policy": policy,
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn rejection_message(basis: &CeilingBasis, ceiling: Money) -> String {
    match basis {
        CeilingBasis::GrossSalary => {
            "Requested advance amount cannot exceed your gross salary.".into()
        }
        CeilingBasis::NetEstimate { net_ratio } => format!(
            "Requested advance amount cannot exceed {ceiling} ({}% of gross salary).",
            (*net_ratio * dec!(100)).normalize()
        ),
    }
}

fn validate_input(input: &AdvanceInput) -> SalaryAdvanceResult<()> {
    if input.gross_salary <= Decimal::ZERO {
        return Err(SalaryAdvanceError::invalid(
            "gross_salary",
            "Gross salary must be positive",
        ));
    }
    if input.requested_amount <= Decimal::ZERO {
        return Err(SalaryAdvanceError::invalid(
            "requested_amount",
            "Requested amount must be positive",
        ));
    }
    ensure_cents("gross_salary", input.gross_salary)?;
    ensure_cents("requested_amount", input.requested_amount)?;
    Ok(())
}
