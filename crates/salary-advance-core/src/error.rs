use thiserror::Error;

#[derive(Debug, Error)]
pub enum SalaryAdvanceError {
    #[error("Invalid argument: {field} — {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("Computation error: {0}")]
    ComputationError(String),

    /// An engine invariant was violated. Indicates a defect, never bad input.
    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl SalaryAdvanceError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        SalaryAdvanceError::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for SalaryAdvanceError {
    fn from(e: serde_json::Error) -> Self {
        SalaryAdvanceError::SerializationError(e.to_string())
    }
}

impl From<serde_yaml::Error> for SalaryAdvanceError {
    fn from(e: serde_yaml::Error) -> Self {
        SalaryAdvanceError::ConfigError(e.to_string())
    }
}
