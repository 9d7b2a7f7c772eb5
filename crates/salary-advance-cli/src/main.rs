mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::advance::AdvanceArgs;
use commands::loan::{LoanArgs, PaymentArgs};
use commands::salary::{MonthlyGrossArgs, NetSalaryArgs};

/// Salary advance and loan amortisation calculations
#[derive(Parser)]
#[command(
    name = "sadv",
    version,
    about = "Salary advance and loan amortisation calculations",
    long_about = "A CLI for salary advance eligibility and fixed-rate loan amortisation \
                  with decimal precision. Supports advance fees and payouts, monthly \
                  payments, full amortisation schedules, and salary-capped loans."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Check salary advance eligibility and compute fee and payout
    Advance(AdvanceArgs),
    /// Build a loan amortisation schedule (salary-capped when --gross-salary is given)
    Loan(LoanArgs),
    /// Calculate the level monthly payment of a loan
    Payment(PaymentArgs),
    /// Convert a per-period salary into its monthly gross equivalent
    MonthlyGross(MonthlyGrossArgs),
    /// Estimate monthly take-home pay as a flat share of gross
    NetSalary(NetSalaryArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Advance(args) => commands::advance::run_advance(args),
        Commands::Loan(args) => commands::loan::run_loan(args),
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::MonthlyGross(args) => commands::salary::run_monthly_gross(args),
        Commands::NetSalary(args) => commands::salary::run_net_salary(args),
        Commands::Version => {
            println!("sadv {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
