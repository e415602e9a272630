//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{AccountIdentifier, CaseId};
use domain_portfolio::pattern::designators;
use domain_portfolio::{AccountAssignment, CaseParameters, PaymentCycle, PeriodUnit, TermRange};

/// Strategy for period units
pub fn period_unit_strategy() -> impl Strategy<Value = PeriodUnit> {
    prop_oneof![
        Just(PeriodUnit::Week),
        Just(PeriodUnit::Month),
        Just(PeriodUnit::Year),
    ]
}

/// Strategy for payment cycles whose alignment values are all in range
pub fn valid_payment_cycle_strategy() -> impl Strategy<Value = PaymentCycle> {
    let weekly = (1u32..=4, proptest::option::of(1u32..=7)).prop_map(|(period, day)| PaymentCycle {
        alignment_day: day,
        ..PaymentCycle::every(PeriodUnit::Week, period)
    });

    let monthly = (1u32..=12, proptest::option::of(1u32..=5), any::<bool>(), 1u32..=31).prop_map(
        |(period, week, use_day, day)| {
            // A weekday when a week is given, a day of month otherwise
            let day = match week {
                Some(_) => (day - 1) % 7 + 1,
                None => day,
            };
            PaymentCycle {
                alignment_week: week,
                alignment_day: use_day.then_some(day),
                ..PaymentCycle::every(PeriodUnit::Month, period)
            }
        },
    );

    let yearly = (1u32..=3, proptest::option::of(1u32..=12), 1u32..=366).prop_map(
        |(period, month, day)| {
            let day = match month {
                Some(_) => (day - 1) % 31 + 1,
                None => day,
            };
            PaymentCycle {
                alignment_month: month,
                alignment_day: Some(day),
                ..PaymentCycle::every(PeriodUnit::Year, period)
            }
        },
    );

    prop_oneof![weekly, monthly, yearly]
}

/// Strategy for day alignments that exceed the length of the cycle's period
pub fn out_of_range_day_strategy() -> impl Strategy<Value = PaymentCycle> {
    prop_oneof![
        (8u32..=400).prop_map(|day| PaymentCycle::every(PeriodUnit::Week, 1).aligned_on_day(day)),
        (32u32..=400).prop_map(|day| PaymentCycle::monthly().aligned_on_day(day)),
        (367u32..=1000).prop_map(|day| PaymentCycle::every(PeriodUnit::Year, 1).aligned_on_day(day)),
        Just(PaymentCycle::monthly().aligned_on_day(0)),
    ]
}

/// Strategy for non-negative balances with up to six decimal places
pub fn balance_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000_000i64, 0u32..=6).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

/// Strategy for valid case parameter documents
pub fn case_parameters_strategy() -> impl Strategy<Value = CaseParameters> {
    ("[a-z]{3,12}", balance_strategy(), period_unit_strategy(), 1u32..=360, valid_payment_cycle_strategy())
        .prop_map(|(customer, balance, unit, maximum, cycle)| CaseParameters {
            customer_identifier: customer,
            initial_balance: balance,
            term_range: TermRange {
                temporal_unit: unit,
                maximum,
            },
            payment_cycle: cycle,
        })
}

/// Strategy for valid case identifiers
pub fn case_id_strategy() -> impl Strategy<Value = CaseId> {
    "[a-z0-9][a-z0-9._-]{0,31}".prop_map(|id| CaseId::new(id).unwrap())
}

/// Strategy for assignment lists with distinct designators
pub fn assignments_strategy() -> impl Strategy<Value = Vec<AccountAssignment>> {
    proptest::sample::subsequence(designators::ALL.to_vec(), 0..=designators::ALL.len())
        .prop_flat_map(|roles| {
            let count = roles.len();
            (Just(roles), proptest::collection::vec("[0-9]{4}\\.[a-z]{1,8}", count))
        })
        .prop_map(|(roles, accounts)| {
            roles
                .into_iter()
                .zip(accounts)
                .map(|(role, account)| {
                    AccountAssignment::new(role, AccountIdentifier::new(account).unwrap())
                })
                .collect()
        })
}
