use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use salary_advance_core::salary::{self, DEFAULT_NET_RATIO};
use salary_advance_core::PayFrequency;

/// Arguments for the monthly gross conversion
#[derive(Args)]
pub struct MonthlyGrossArgs {
    /// Gross salary for one pay period
    #[arg(long)]
    pub gross_salary: Decimal,

    /// Pay frequency: monthly, bi-weekly, weekly
    #[arg(long, default_value = "monthly")]
    pub pay_frequency: PayFrequency,
}

/// Arguments for the take-home estimate
#[derive(Args)]
pub struct NetSalaryArgs {
    /// Gross salary for one pay period
    #[arg(long)]
    pub gross_salary: Decimal,

    /// Pay frequency: monthly, bi-weekly, weekly
    #[arg(long, default_value = "monthly")]
    pub pay_frequency: PayFrequency,

    /// Share of gross kept as take-home pay
    #[arg(long)]
    pub net_ratio: Option<Decimal>,
}

pub fn run_monthly_gross(args: MonthlyGrossArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let monthly = salary::compute_monthly_gross_equivalent(args.gross_salary, args.pay_frequency)?;
    Ok(json!({
        "monthly_gross": monthly,
        "pay_frequency": args.pay_frequency,
    }))
}

pub fn run_net_salary(args: NetSalaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ratio = args.net_ratio.unwrap_or(DEFAULT_NET_RATIO);
    let net = salary::estimate_monthly_net_salary(args.gross_salary, args.pay_frequency, ratio)?;
    Ok(json!({
        "net_salary": net,
        "net_ratio": ratio,
        "pay_frequency": args.pay_frequency,
    }))
}
