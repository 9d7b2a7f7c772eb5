use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SalaryAdvanceError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Multiples (e.g., 5x gross salary)
pub type Multiple = Decimal;

/// Decimal places every monetary output is rounded to.
pub const MONEY_DP: u32 = 2;

/// Round a monetary amount to cents.
pub fn round_money(value: Money) -> Money {
    value.round_dp(MONEY_DP)
}

/// Reject monetary inputs carrying sub-cent digits. Outputs derived from
/// them are then exact to the cent without further rounding.
pub(crate) fn ensure_cents(field: &str, value: Money) -> Result<(), SalaryAdvanceError> {
    if value.normalize().scale() > MONEY_DP {
        return Err(SalaryAdvanceError::invalid(
            field,
            format!("{value} has more than {MONEY_DP} decimal places"),
        ));
    }
    Ok(())
}

/// How often a salary is paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayFrequency {
    #[default]
    Monthly,
    #[serde(alias = "biweekly")]
    BiWeekly,
    Weekly,
}

impl PayFrequency {
    /// Pay periods counted per month. Two for bi-weekly and four for weekly,
    /// which is an approximation rather than a calendar count.
    pub fn periods_per_month(self) -> Decimal {
        match self {
            PayFrequency::Monthly => Decimal::ONE,
            PayFrequency::BiWeekly => Decimal::TWO,
            PayFrequency::Weekly => Decimal::from(4),
        }
    }
}

impl fmt::Display for PayFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PayFrequency::Monthly => "monthly",
            PayFrequency::BiWeekly => "bi-weekly",
            PayFrequency::Weekly => "weekly",
        };
        f.write_str(s)
    }
}

impl FromStr for PayFrequency {
    type Err = SalaryAdvanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(PayFrequency::Monthly),
            "bi-weekly" | "biweekly" => Ok(PayFrequency::BiWeekly),
            "weekly" => Ok(PayFrequency::Weekly),
            other => Err(SalaryAdvanceError::invalid(
                "pay_frequency",
                format!("'{other}' is not one of 'monthly', 'bi-weekly', 'weekly'"),
            )),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pay_frequency_parse_is_case_insensitive() {
        assert_eq!("Monthly".parse::<PayFrequency>().unwrap(), PayFrequency::Monthly);
        assert_eq!("BI-WEEKLY".parse::<PayFrequency>().unwrap(), PayFrequency::BiWeekly);
        assert_eq!("biweekly".parse::<PayFrequency>().unwrap(), PayFrequency::BiWeekly);
        assert_eq!(" weekly ".parse::<PayFrequency>().unwrap(), PayFrequency::Weekly);
    }

    #[test]
    fn test_pay_frequency_unknown_rejected() {
        let err = "fortnightly".parse::<PayFrequency>().unwrap_err();
        assert!(matches!(err, SalaryAdvanceError::InvalidArgument { .. }));
    }

    #[test]
    fn test_pay_frequency_serde_names() {
        let json = serde_json::to_string(&PayFrequency::BiWeekly).unwrap();
        assert_eq!(json, "\"bi-weekly\"");
        let parsed: PayFrequency = serde_json::from_str("\"biweekly\"").unwrap();
        assert_eq!(parsed, PayFrequency::BiWeekly);
        assert!(serde_json::from_str::<PayFrequency>("\"daily\"").is_err());
    }

    #[test]
    fn test_round_money_uses_cents() {
        assert_eq!(round_money(dec!(439.5833333)), dec!(439.58));
        assert_eq!(round_money(dec!(10)), dec!(10));
    }

    #[test]
    fn test_ensure_cents() {
        assert!(ensure_cents("x", dec!(1000)).is_ok());
        assert!(ensure_cents("x", dec!(1000.10)).is_ok());
        // Trailing zeros beyond cents are not sub-cent digits
        assert!(ensure_cents("x", dec!(1000.1000)).is_ok());
        let err = ensure_cents("gross_salary", dec!(1000.005)).unwrap_err();
        assert!(matches!(
            err,
            SalaryAdvanceError::InvalidArgument { ref field, .. } if field == "gross_salary"
        ));
    }
}
