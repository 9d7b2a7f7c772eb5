use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::advance::AdvancePolicy;
use crate::loan::LoanPolicy;
use crate::{SalaryAdvanceError, SalaryAdvanceResult};

/// Every tunable business rule of the engine, loadable from YAML or JSON.
///
/// ```yaml
/// advance:
///   ceiling_basis: { net_estimate: { net_ratio: "0.90" } }   # or "gross_salary"
///   fee_rate: "0.15"
/// loan:
///   max_salary_multiple: "5"
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnginePolicy {
    pub advance: AdvancePolicy,
    pub loan: LoanPolicy,
}

impl EnginePolicy {
    /// Parse and validate a policy document. JSON is accepted as YAML.
    pub fn from_yaml_str(source: &str) -> SalaryAdvanceResult<Self> {
        let policy: EnginePolicy = serde_yaml::from_str(source)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn load(path: impl AsRef<Path>) -> SalaryAdvanceResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            SalaryAdvanceError::ConfigError(format!("failed to read '{}': {e}", path.display()))
        })?;
        let policy = Self::from_yaml_str(&source)?;
        debug!(path = %path.display(), ?policy, "loaded engine policy");
        Ok(policy)
    }

    pub fn validate(&self) -> SalaryAdvanceResult<()> {
        self.advance.validate()?;
        self.loan.validate()
    }
}

/// Look up a named advance policy: `standard` or `net-estimate`.
pub fn advance_preset(name: &str) -> SalaryAdvanceResult<AdvancePolicy> {
    match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
        "standard" => Ok(AdvancePolicy::standard()),
        "net-estimate" => Ok(AdvancePolicy::net_estimate()),
        other => Err(SalaryAdvanceError::invalid(
            "preset",
            format!("unknown advance preset '{other}' (expected 'standard' or 'net-estimate')"),
        )),
    }
}

/// Look up a named loan policy: `unconstrained` or `salary-capped`.
pub fn loan_preset(name: &str) -> SalaryAdvanceResult<LoanPolicy> {
    match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
        "unconstrained" => Ok(LoanPolicy::unconstrained()),
        "salary-capped" => Ok(LoanPolicy::salary_capped()),
        other => Err(SalaryAdvanceError::invalid(
            "preset",
            format!("unknown loan preset '{other}' (expected 'unconstrained' or 'salary-capped')"),
        )),
    }
}
