pub mod advance;
pub mod loan;
pub mod salary;

use clap::Args;

use salary_advance_core::advance::AdvancePolicy;
use salary_advance_core::loan::LoanPolicy;
use salary_advance_core::policy::{self, EnginePolicy};

/// Policy selection shared by the advance and loan commands
#[derive(Args)]
pub struct PolicyArgs {
    /// Named preset (advance: standard, net-estimate; loan: unconstrained, salary-capped)
    #[arg(long)]
    pub preset: Option<String>,

    /// Path to a YAML or JSON policy file
    #[arg(long, conflicts_with = "preset")]
    pub policy: Option<String>,
}

impl PolicyArgs {
    fn engine_policy(&self) -> Result<Option<EnginePolicy>, Box<dyn std::error::Error>> {
        match self.policy {
            Some(ref path) => Ok(Some(EnginePolicy::load(path)?)),
            None => Ok(None),
        }
    }

    pub fn advance_policy(&self) -> Result<AdvancePolicy, Box<dyn std::error::Error>> {
        if let Some(engine) = self.engine_policy()? {
            return Ok(engine.advance);
        }
        match self.preset {
            Some(ref name) => Ok(policy::advance_preset(name)?),
            None => Ok(AdvancePolicy::default()),
        }
    }

    pub fn loan_policy(&self) -> Result<LoanPolicy, Box<dyn std::error::Error>> {
        if let Some(engine) = self.engine_policy()? {
            return Ok(engine.loan);
        }
        match self.preset {
            Some(ref name) => Ok(policy::loan_preset(name)?),
            None => Ok(LoanPolicy::default()),
        }
    }
}
