pub mod advance;
pub mod amortization;
pub mod error;
pub mod loan;
pub mod policy;
pub mod salary;
pub mod types;

pub use error::SalaryAdvanceError;
pub use types::*;

/// Standard result type for all engine operations
pub type SalaryAdvanceResult<T> = Result<T, SalaryAdvanceError>;
