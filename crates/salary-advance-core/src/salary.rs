use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::error::SalaryAdvanceError;
use crate::types::{ensure_cents, round_money, Money, PayFrequency, Rate};
use crate::SalaryAdvanceResult;

/// Flat take-home fraction used when no other net ratio is supplied.
pub const DEFAULT_NET_RATIO: Rate = dec!(0.70);

/// Monthly-equivalent gross pay for a salary paid at `pay_frequency`.
///
/// Bi-weekly pay is doubled and weekly pay is quadrupled. This is not
/// calendar-accurate (a year has 26 bi-weekly and 52 weekly pay days), so
/// callers needing exact annualisation must not rely on it.
pub fn compute_monthly_gross_equivalent(
    gross_salary: Money,
    pay_frequency: PayFrequency,
) -> SalaryAdvanceResult<Money> {
    if gross_salary <= Decimal::ZERO {
        return Err(SalaryAdvanceError::invalid(
            "gross_salary",
            "Gross salary must be positive",
        ));
    }
    ensure_cents("gross_salary", gross_salary)?;

    let monthly = gross_salary * pay_frequency.periods_per_month();
    debug!(%gross_salary, %pay_frequency, %monthly, "monthly gross equivalent");
    Ok(monthly)
}

/// Rough monthly take-home estimate: monthly gross scaled by `net_ratio`.
/// No tax or withholding rules are applied.
pub fn estimate_monthly_net_salary(
    gross_salary: Money,
    pay_frequency: PayFrequency,
    net_ratio: Rate,
) -> SalaryAdvanceResult<Money> {
    validate_net_ratio(net_ratio)?;
    let monthly = compute_monthly_gross_equivalent(gross_salary, pay_frequency)?;
    Ok(round_money(monthly * net_ratio))
}

pub(crate) fn validate_net_ratio(net_ratio: Rate) -> SalaryAdvanceResult<()> {
    if net_ratio <= Decimal::ZERO || net_ratio > Decimal::ONE {
        return Err(SalaryAdvanceError::invalid(
            "net_ratio",
            "Net ratio must be in (0, 1]",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_unchanged() {
        let m = compute_monthly_gross_equivalent(dec!(3000), PayFrequency::Monthly).unwrap();
        assert_eq!(m, dec!(3000));
    }

    #[test]
    fn test_biweekly_doubles_and_weekly_quadruples() {
        let bw = compute_monthly_gross_equivalent(dec!(1500), PayFrequency::BiWeekly).unwrap();
        assert_eq!(bw, dec!(3000));
        let w = compute_monthly_gross_equivalent(dec!(750.25), PayFrequency::Weekly).unwrap();
        assert_eq!(w, dec!(3001.00));
    }

    #[test]
    fn test_non_positive_gross_rejected() {
        assert!(compute_monthly_gross_equivalent(Decimal::ZERO, PayFrequency::Monthly).is_err());
        assert!(compute_monthly_gross_equivalent(dec!(-1), PayFrequency::Weekly).is_err());
    }

    #[test]
    fn test_net_estimate_default_ratio() {
        // 1000 weekly -> 4000 monthly gross -> 2800 at 70%
        let net =
            estimate_monthly_net_salary(dec!(1000), PayFrequency::Weekly, DEFAULT_NET_RATIO)
                .unwrap();
        assert_eq!(net, dec!(2800.00));
    }

    #[test]
    fn test_net_estimate_rounds_to_cents() {
        let net =
            estimate_monthly_net_salary(dec!(1234.57), PayFrequency::Weekly, dec!(0.7)).unwrap();
        // 4938.28 * 0.7 = 3456.796
        assert_eq!(net, dec!(3456.80));
    }

    #[test]
    fn test_sub_cent_gross_rejected() {
        let err = compute_monthly_gross_equivalent(dec!(1000.005), PayFrequency::BiWeekly)
            .unwrap_err();
        assert!(matches!(err, SalaryAdvanceError::InvalidArgument { .. }));
        assert!(
            estimate_monthly_net_salary(dec!(1000.005), PayFrequency::Monthly, DEFAULT_NET_RATIO)
                .is_err()
        );
        // Extra trailing zeros are still whole cents
        let m = compute_monthly_gross_equivalent(dec!(1000.500), PayFrequency::Weekly).unwrap();
        assert_eq!(m, dec!(4002));
    }

    #[test]
    fn test_net_ratio_bounds() {
        let gross = dec!(1000);
        assert!(estimate_monthly_net_salary(gross, PayFrequency::Monthly, Decimal::ZERO).is_err());
        assert!(estimate_monthly_net_salary(gross, PayFrequency::Monthly, dec!(1.01)).is_err());
        assert!(estimate_monthly_net_salary(gross, PayFrequency::Monthly, Decimal::ONE).is_ok());
    }
}
