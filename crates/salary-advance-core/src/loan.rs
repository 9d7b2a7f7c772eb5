use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::amortization::{
    build_schedule, early_payoff_warning, monthly_rate, LoanInput, LoanOutput,
};
use crate::{types::*, SalaryAdvanceError, SalaryAdvanceResult};

/// Affordability rule applied before a schedule is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanPolicy {
    /// Largest principal as a multiple of gross salary. `None` means no cap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_salary_multiple: Option<Multiple>,
}

impl LoanPolicy {
    pub fn unconstrained() -> Self {
        LoanPolicy {
            max_salary_multiple: None,
        }
    }

    /// Principal capped at five times gross salary.
    pub fn salary_capped() -> Self {
        LoanPolicy {
            max_salary_multiple: Some(dec!(5)),
        }
    }

    pub fn validate(&self) -> SalaryAdvanceResult<()> {
        if let Some(m) = self.max_salary_multiple {
            if m <= Decimal::ZERO {
                return Err(SalaryAdvanceError::invalid(
                    "max_salary_multiple",
                    "Salary multiple must be positive",
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanApplication {
    pub gross_salary: Money,
    #[serde(flatten)]
    pub loan: LoanInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAssessment {
    pub eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_loan_amount: Option<Money>,
    pub reason: String,
    /// Present only when the application is eligible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan: Option<LoanOutput>,
}

/// Check a loan application against `policy` and amortise it when allowed.
pub fn assess_loan(
    application: &LoanApplication,
    policy: &LoanPolicy,
) -> SalaryAdvanceResult<ComputationOutput<LoanAssessment>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if application.gross_salary <= Decimal::ZERO {
        return Err(SalaryAdvanceError::invalid(
            "gross_salary",
            "Gross salary must be positive",
        ));
    }
    ensure_cents("gross_salary", application.gross_salary)?;
    ensure_cents("principal", application.loan.principal)?;
    policy.validate()?;

    let cap = policy
        .max_salary_multiple
        .map(|m| round_money(application.gross_salary * m));

    let assessment = match cap {
        Some(max) if application.loan.principal > max => {
            debug!(principal = %application.loan.principal, %max, "loan rejected: above salary cap");
            LoanAssessment {
                eligible: false,
                max_loan_amount: Some(max),
                reason: format!("Requested loan amount exceeds the maximum of {max}."),
                loan: None,
            }
        }
        _ => {
            let loan = build_schedule(&application.loan)?;
            warnings.extend(early_payoff_warning(&loan));
            LoanAssessment {
                eligible: true,
                max_loan_amount: cap,
                reason: "Loan calculation complete.".into(),
                loan: Some(loan),
            }
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Salary-Capped Loan Assessment",
        &serde_json::json!({
            "gross_salary": application.gross_salary.to_string(),
            "principal": application.loan.principal.to_string(),
            "monthly_rate": monthly_rate(application.loan.annual_rate_percent).to_string(),
            "term_months": application.loan.term_months,
            "policy": policy,
        }),
        warnings,
        elapsed,
        assessment,
    ))
}
