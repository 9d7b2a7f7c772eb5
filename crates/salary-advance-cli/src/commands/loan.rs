use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use salary_advance_core::amortization::{self, LoanInput};
use salary_advance_core::loan::{self, LoanApplication};

use super::PolicyArgs;
use crate::input;

/// Arguments for loan amortisation
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 5.5 for 5.5%)
    #[arg(long)]
    pub annual_rate: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Gross salary; enables the salary-cap eligibility check
    #[arg(long)]
    pub gross_salary: Option<Decimal>,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

/// Arguments for the level monthly payment
#[derive(Args)]
pub struct PaymentArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent
    #[arg(long)]
    pub annual_rate: Decimal,

    /// Term in months
    #[arg(long)]
    pub term_months: u32,
}

pub fn run_loan(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let data: Value = if let Some(ref path) = args.input {
        input::file::read_json_value(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        let loan_input = LoanInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args
                .annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            term_months: args
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
        };
        match args.gross_salary {
            Some(gross_salary) => serde_json::to_value(LoanApplication {
                gross_salary,
                loan: loan_input,
            })?,
            None => serde_json::to_value(loan_input)?,
        }
    };

    if data.get("gross_salary").is_some() {
        let application: LoanApplication = serde_json::from_value(data)?;
        let policy = args.policy.loan_policy()?;
        let result = loan::assess_loan(&application, &policy)?;
        Ok(serde_json::to_value(result)?)
    } else {
        let loan_input: LoanInput = serde_json::from_value(data)?;
        let result = amortization::generate_schedule(&loan_input)?;
        Ok(serde_json::to_value(result)?)
    }
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payment =
        amortization::compute_monthly_payment(args.principal, args.annual_rate, args.term_months)?;
    Ok(json!({ "period_payment": payment }))
}
