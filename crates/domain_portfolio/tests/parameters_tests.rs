//! Tests for case parameters, payment-cycle validation and account assignment sets

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_portfolio::pattern::designators;
use domain_portfolio::{
    AccountAssignment, AccountAssignmentSet, CaseParameters, PaymentCycle, PeriodUnit,
};
use test_utils::{
    assignments_strategy, case_parameters_strategy, out_of_range_day_strategy,
    valid_payment_cycle_strategy, IdFixtures, ParameterFixtures,
};

// ============= PAYMENT CYCLE TESTS =============
mod payment_cycle_tests {
    use super::*;

    #[test]
    fn test_weekday_alignment_within_month() {
        let cycle = PaymentCycle::monthly().aligned_on_day(1).aligned_on_week(2);
        assert!(cycle.validate().is_ok());
        assert_eq!(cycle.day_range(), 1..=7);
    }

    #[test]
    fn test_sixth_week_of_month_rejected() {
        let cycle = PaymentCycle::monthly().aligned_on_week(6);
        assert_eq!(cycle.validate().unwrap_err().code(), "validation");
    }

    #[test]
    fn test_yearly_ranges_depend_on_month() {
        let by_day_of_year = PaymentCycle::every(PeriodUnit::Year, 1).aligned_on_day(366);
        assert!(by_day_of_year.validate().is_ok());

        let in_march = PaymentCycle::every(PeriodUnit::Year, 1)
            .aligned_on_month(3)
            .aligned_on_day(32);
        assert!(in_march.validate().is_err());

        let week_53 = PaymentCycle::every(PeriodUnit::Year, 1).aligned_on_week(53);
        assert!(week_53.validate().is_ok());
    }

    #[test]
    fn test_month_alignment_only_for_years() {
        let cycle = PaymentCycle::monthly().aligned_on_month(2);
        assert!(cycle.validate().is_err());

        let cycle = PaymentCycle::every(PeriodUnit::Year, 1).aligned_on_month(13);
        assert!(cycle.validate().is_err());
    }

    proptest! {
        #[test]
        fn prop_generated_cycles_validate(cycle in valid_payment_cycle_strategy()) {
            prop_assert!(cycle.validate().is_ok(), "rejected {:?}", cycle);
        }

        #[test]
        fn prop_day_beyond_period_rejected(cycle in out_of_range_day_strategy()) {
            prop_assert!(cycle.validate().is_err(), "accepted {:?}", cycle);
        }
    }
}

// ============= NORMALIZATION TESTS =============
mod normalization_tests {
    use super::*;

    fn with_balance(balance: Decimal) -> CaseParameters {
        CaseParameters {
            initial_balance: balance,
            ..ParameterFixtures::case_parameters()
        }
    }

    #[test]
    fn test_half_even_rounding() {
        assert_eq!(with_balance(dec!(0.125)).normalized(2).unwrap().initial_balance, dec!(0.12));
        assert_eq!(with_balance(dec!(0.135)).normalized(2).unwrap().initial_balance, dec!(0.14));
    }

    #[test]
    fn test_negative_balance_rejected() {
        let result = with_balance(dec!(-0.01)).normalized(2);
        assert_eq!(result.unwrap_err().code(), "validation");
    }

    #[test]
    fn test_zero_scale_product() {
        let normalized = with_balance(dec!(1500.5)).normalized(0).unwrap();
        assert_eq!(normalized.initial_balance, dec!(1500));
        assert_eq!(normalized.initial_balance.scale(), 0);
    }

    #[test]
    fn test_balance_too_large_for_scale_rejected() {
        let result = with_balance(Decimal::MAX).normalized(2);
        assert_eq!(result.unwrap_err().code(), "validation");

        let twenty_eight_digits = Decimal::from_i128_with_scale(10i128.pow(27), 0);
        let result = with_balance(twenty_eight_digits).normalized(4);
        assert_eq!(result.unwrap_err().code(), "validation");
    }

    #[test]
    fn test_largest_balance_that_fits_scale_accepted() {
        let twenty_six_digits = Decimal::from_i128_with_scale(10i128.pow(25), 0);
        let normalized = with_balance(twenty_six_digits).normalized(2).unwrap();
        assert_eq!(normalized.initial_balance.scale(), 2);
        assert_eq!(normalized.initial_balance, twenty_six_digits);
    }

    proptest! {
        #[test]
        fn prop_normalized_balance_has_product_scale(params in case_parameters_strategy(), scale in 0u32..=4) {
            let original = params.initial_balance;
            let normalized = params.normalized(scale).unwrap();
            prop_assert_eq!(normalized.initial_balance.scale(), scale);
            let step = Decimal::new(1, scale);
            prop_assert!((normalized.initial_balance - original).abs() <= step);
        }
    }
}

// ============= WIRE FORMAT TESTS =============
mod wire_format_tests {
    use super::*;

    #[test]
    fn test_parse_wire_document() {
        let json = r#"{
            "customerIdentifier": "alice",
            "initialBalance": "10",
            "termRange": {"temporalUnit": "MONTH", "maximum": 12},
            "paymentCycle": {"temporalUnit": "MONTH", "period": 1, "alignmentDay": 1, "alignmentWeek": 2}
        }"#;

        let params = CaseParameters::from_json(json).unwrap();
        assert_eq!(params.customer_identifier, "alice");
        assert_eq!(params.initial_balance, Decimal::TEN);
        assert_eq!(params.payment_cycle.alignment_week, Some(2));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_malformed_document_is_validation_error() {
        let result = CaseParameters::from_json(r#"{"customerIdentifier": 3}"#);
        assert_eq!(result.unwrap_err().code(), "validation");
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let json = r#"{
            "customerIdentifier": "alice",
            "initialBalance": "10",
            "termRange": {"temporalUnit": "DECADE", "maximum": 1},
            "paymentCycle": {"temporalUnit": "MONTH", "period": 1}
        }"#;
        assert!(CaseParameters::from_json(json).is_err());
    }
}

// ============= ASSIGNMENT SET TESTS =============
mod assignment_set_tests {
    use super::*;

    #[test]
    fn test_equality_ignores_order() {
        let loan = AccountAssignment::new(designators::CUSTOMER_LOAN, IdFixtures::account("7010.1"));
        let entry = AccountAssignment::new(designators::ENTRY, IdFixtures::account("1000.1"));

        let forward = AccountAssignmentSet::from_assignments(vec![loan.clone(), entry.clone()]).unwrap();
        let backward = AccountAssignmentSet::from_assignments(vec![entry, loan]).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_replace_all_keeps_contents_on_error() {
        let mut set = AccountAssignmentSet::from_assignments(vec![AccountAssignment::new(
            designators::ENTRY,
            IdFixtures::account("1000.1"),
        )])
        .unwrap();

        let conflicting = vec![
            AccountAssignment::new(designators::CUSTOMER_LOAN, IdFixtures::account("7010.1")),
            AccountAssignment::new(designators::CUSTOMER_LOAN, IdFixtures::account("7010.2")),
        ];
        assert!(set.replace_all(conflicting).is_err());
        assert_eq!(set.get(designators::ENTRY).unwrap().as_str(), "1000.1");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_assign_replaces_by_role() {
        let mut set = AccountAssignmentSet::default();
        set.assign(AccountAssignment::new(designators::ENTRY, IdFixtures::account("1000.1")))
            .unwrap();
        let previous = set
            .assign(AccountAssignment::new(designators::ENTRY, IdFixtures::account("1000.2")))
            .unwrap();

        assert_eq!(previous.unwrap().as_str(), "1000.1");
        assert_eq!(set.len(), 1);
        assert_eq!(set.remove(designators::ENTRY).unwrap().as_str(), "1000.2");
        assert!(set.is_empty());
    }

    #[test]
    fn test_identical_pairs_collapse_into_one_entry() {
        let loan = AccountAssignment::new(designators::CUSTOMER_LOAN, IdFixtures::account("7010.1"));
        let set = AccountAssignmentSet::from_assignments(vec![loan.clone(), loan.clone()]).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set, AccountAssignmentSet::from_assignments(vec![loan]).unwrap());
    }

    #[test]
    fn test_overlong_role_rejected() {
        let role = "R".repeat(33);
        let result = AccountAssignmentSet::from_assignments(vec![AccountAssignment::new(
            role,
            IdFixtures::account("1000.1"),
        )]);
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn prop_distinct_roles_survive_json(assignments in assignments_strategy()) {
            let set = AccountAssignmentSet::from_assignments(assignments.clone()).unwrap();
            prop_assert_eq!(set.len(), assignments.len());

            let json = serde_json::to_string(&set).unwrap();
            let parsed: AccountAssignmentSet = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(parsed, set);
        }
    }
}
