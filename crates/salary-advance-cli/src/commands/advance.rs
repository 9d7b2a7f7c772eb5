use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use salary_advance_core::advance::{self, AdvanceInput};
use salary_advance_core::PayFrequency;

use super::PolicyArgs;
use crate::input;

/// Arguments for salary advance calculation
#[derive(Args)]
pub struct AdvanceArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Gross salary for one pay period
    #[arg(long)]
    pub gross_salary: Option<Decimal>,

    /// Pay frequency: monthly, bi-weekly, weekly
    #[arg(long, default_value = "monthly")]
    pub pay_frequency: PayFrequency,

    /// Amount requested as an advance
    #[arg(long)]
    pub requested_amount: Option<Decimal>,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

pub fn run_advance(args: AdvanceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let advance_input: AdvanceInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let gross = args
            .gross_salary
            .ok_or("--gross-salary is required (or provide --input)")?;
        let requested = args
            .requested_amount
            .ok_or("--requested-amount is required (or provide --input)")?;

        AdvanceInput {
            gross_salary: gross,
            pay_frequency: args.pay_frequency,
            requested_amount: requested,
        }
    };

    let policy = args.policy.advance_policy()?;
    let result = advance::compute_advance(&advance_input, &policy)?;
    Ok(serde_json::to_value(result)?)
}
