use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use salary_advance_core::advance::{self, AdvanceInput, AdvancePolicy};
use salary_advance_core::amortization::{self, LoanInput};
use salary_advance_core::loan::{self, LoanApplication, LoanPolicy};
use salary_advance_core::policy::EnginePolicy;
use salary_advance_core::salary;
use salary_advance_core::{PayFrequency, SalaryAdvanceError};

// ===========================================================================
// Amortisation schedule tests
// ===========================================================================

fn loan_input(principal: Decimal, rate: Decimal, term: u32) -> LoanInput {
    LoanInput {
        principal,
        annual_rate_percent: rate,
        term_months: term,
    }
}

#[test]
fn test_reference_loan_known_answer() {
    // 5000 at 10% over 12 months => 439.58/month, ~275 interest
    let out = amortization::generate_schedule(&loan_input(dec!(5000), dec!(10), 12))
        .unwrap()
        .result;
    assert_eq!(out.period_payment, dec!(439.58));
    assert_eq!(out.schedule.len(), 12);
    assert!(
        (out.total_interest_paid - dec!(275)).abs() < dec!(1),
        "Expected interest ~275, got {}",
        out.total_interest_paid
    );
    assert_eq!(out.total_repayable, dec!(5000) + out.total_interest_paid);
    assert_eq!(out.schedule[11].ending_balance, Decimal::ZERO);
}

#[test]
fn test_schedule_balances_chain_and_close() {
    for (principal, rate, term) in [
        (dec!(800), dec!(3.9), 9),
        (dec!(15000), dec!(18), 48),
        (dec!(320000), dec!(4.25), 300),
    ] {
        let out = amortization::generate_schedule(&loan_input(principal, rate, term))
            .unwrap()
            .result;

        let mut expected_start = principal;
        for entry in &out.schedule {
            assert_eq!(entry.starting_balance, expected_start);
            assert!(entry.ending_balance <= entry.starting_balance);
            assert!(entry.ending_balance >= Decimal::ZERO);
            expected_start = entry.ending_balance;
        }

        assert_eq!(out.schedule.last().unwrap().ending_balance, Decimal::ZERO);

        let repaid: Decimal = out.schedule.iter().map(|e| e.principal_payment).sum();
        assert!(
            (repaid - principal).abs() <= dec!(0.01),
            "principal repaid {} != {}",
            repaid,
            principal
        );

        let interest: Decimal = out.schedule.iter().map(|e| e.interest_payment).sum();
        assert_eq!(out.total_interest_paid, interest.round_dp(2));
    }
}

#[test]
fn test_zero_rate_straight_line() {
    let out = amortization::generate_schedule(&loan_input(dec!(1000), Decimal::ZERO, 6))
        .unwrap()
        .result;
    for entry in &out.schedule[..5] {
        assert_eq!(entry.interest_payment, Decimal::ZERO);
        assert_eq!(entry.principal_payment, dec!(166.67));
    }
    // 1000 - 5 * 166.67 = 166.65
    assert_eq!(out.schedule[5].principal_payment, dec!(166.65));
    assert_eq!(out.total_interest_paid, Decimal::ZERO);
    assert_eq!(out.total_repayable, dec!(1000));
}

#[test]
fn test_degenerate_denominator_never_returns_payment() {
    let err = amortization::compute_monthly_payment(dec!(50000), dec!(0.00000001), 24).unwrap_err();
    assert!(matches!(err, SalaryAdvanceError::ComputationError(_)));
}

#[test]
fn test_payment_validation() {
    assert!(matches!(
        amortization::compute_monthly_payment(dec!(0), dec!(5), 12),
        Err(SalaryAdvanceError::InvalidArgument { .. })
    ));
    assert!(matches!(
        amortization::compute_monthly_payment(dec!(1000), dec!(-1), 12),
        Err(SalaryAdvanceError::InvalidArgument { .. })
    ));
    assert!(matches!(
        amortization::compute_monthly_payment(dec!(1000), dec!(5), 0),
        Err(SalaryAdvanceError::InvalidArgument { .. })
    ));
}

#[test]
fn test_schedule_output_serialises_as_strings() {
    let out = amortization::generate_schedule(&loan_input(dec!(5000), dec!(10), 12)).unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["result"]["period_payment"], "439.58");
    assert_eq!(json["result"]["schedule"][0]["month"], 1);
    assert_eq!(json["metadata"]["precision"], "rust_decimal_128bit");
}

// ===========================================================================
// Salary advance tests
// ===========================================================================

fn advance_input(gross: Decimal, requested: Decimal) -> AdvanceInput {
    AdvanceInput {
        gross_salary: gross,
        pay_frequency: PayFrequency::Monthly,
        requested_amount: requested,
    }
}

#[test]
fn test_advance_known_answer() {
    let out = advance::compute_advance(&advance_input(dec!(1000), dec!(100)), &AdvancePolicy::default())
        .unwrap()
        .result;
    assert!(out.eligible);
    assert_eq!(out.approved_amount, dec!(100));
    assert_eq!(out.fee_amount, dec!(5.00));
    assert_eq!(out.net_payout, dec!(95.00));
}

#[test]
fn test_advance_over_gross_rejected() {
    let out = advance::compute_advance(&advance_input(dec!(1000), dec!(1500)), &AdvancePolicy::standard())
        .unwrap()
        .result;
    assert!(!out.eligible);
    assert_eq!(out.approved_amount, Decimal::ZERO);
    assert_eq!(out.fee_amount, Decimal::ZERO);
    assert_eq!(out.net_payout, Decimal::ZERO);
}

#[test]
fn test_advance_policies_differ_on_same_request() {
    let input = advance_input(dec!(2000), dec!(1900));
    let standard = advance::compute_advance(&input, &AdvancePolicy::standard())
        .unwrap()
        .result;
    let net = advance::compute_advance(&input, &AdvancePolicy::net_estimate())
        .unwrap()
        .result;
    assert!(standard.eligible);
    assert_eq!(standard.fee_amount, dec!(95.00));
    assert!(!net.eligible);
    assert_eq!(net.max_advance_amount, dec!(1800.00));
}

// ===========================================================================
// Salary helpers and policy-driven loans
// ===========================================================================

#[test]
fn test_monthly_gross_equivalents() {
    assert_eq!(
        salary::compute_monthly_gross_equivalent(dec!(1200), PayFrequency::BiWeekly).unwrap(),
        dec!(2400)
    );
    assert_eq!(
        salary::compute_monthly_gross_equivalent(dec!(600), PayFrequency::Weekly).unwrap(),
        dec!(2400)
    );
}

#[test]
fn test_loan_policy_from_yaml_caps_principal() {
    let policy = EnginePolicy::from_yaml_str("loan:\n  max_salary_multiple: \"2\"\n").unwrap();
    let application = LoanApplication {
        gross_salary: dec!(1500),
        loan: loan_input(dec!(3500), dec!(8), 24),
    };
    let out = loan::assess_loan(&application, &policy.loan).unwrap().result;
    assert!(!out.eligible);
    assert_eq!(out.max_loan_amount, Some(dec!(3000)));

    let unconstrained = loan::assess_loan(&application, &LoanPolicy::unconstrained())
        .unwrap()
        .result;
    assert!(unconstrained.eligible);
    assert_eq!(unconstrained.loan.unwrap().schedule.len(), 24);
}
