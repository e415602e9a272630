//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for products and cases. These fixtures are
//! designed to be consistent and predictable for unit tests; the `unique_*`
//! helpers exist for tests that share one engine across many cases.

use chrono::{DateTime, TimeZone, Utc};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::Username;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use core_kernel::{AccountIdentifier, Actor, CaseId, CurrencyCode, ProductId};
use domain_portfolio::pattern::{designators, INDIVIDUAL_LENDING};
use domain_portfolio::{
    AccountAssignment, CaseParameters, CreateProductRequest, PaymentCycle, PeriodUnit, TermRange,
};

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Instant the test clock starts at (Jan 1, 2024)
    pub fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }
}

/// Fixture for identifiers
pub struct IdFixtures;

impl IdFixtures {
    pub fn product_id() -> ProductId {
        ProductId::new("agro-loans").unwrap()
    }

    pub fn case_id() -> CaseId {
        CaseId::new("case-0001").unwrap()
    }

    /// Random 32 character product identifier
    pub fn unique_product_id() -> ProductId {
        ProductId::new(Uuid::new_v4().simple().to_string()).unwrap()
    }

    /// Random 32 character case identifier
    pub fn unique_case_id() -> CaseId {
        CaseId::new(Uuid::new_v4().simple().to_string()).unwrap()
    }

    /// Case identifiers that sort in creation order
    pub fn numbered_case_id(n: usize) -> CaseId {
        CaseId::new(format!("case-{:04}", n)).unwrap()
    }

    pub fn account(name: &str) -> AccountIdentifier {
        AccountIdentifier::new(name).unwrap()
    }
}

/// Fixture for actors
pub struct ActorFixtures;

impl ActorFixtures {
    /// Default acting user
    pub fn fred() -> Actor {
        Actor::new("fred")
    }

    /// A second user for last-modified checks
    pub fn wilma() -> Actor {
        Actor::new("wilma")
    }
}

/// Fixture for product requests
pub struct ProductFixtures;

impl ProductFixtures {
    /// Individual lending product in USD with two minor digits
    pub fn create_product_request(identifier: ProductId) -> CreateProductRequest {
        CreateProductRequest {
            identifier,
            name: CompanyName().fake(),
            description: Some("Agricultural loans".to_string()),
            pattern_package: INDIVIDUAL_LENDING.to_string(),
            currency_code: CurrencyCode::new("USD").unwrap(),
            minor_currency_unit_digits: Some(2),
        }
    }
}

/// Fixture for case parameters
pub struct ParameterFixtures;

impl ParameterFixtures {
    /// Monthly cycle, no alignment, balance of 1000.00
    pub fn case_parameters() -> CaseParameters {
        CaseParameters {
            customer_identifier: Username().fake(),
            initial_balance: dec!(1000.00),
            term_range: TermRange {
                temporal_unit: PeriodUnit::Month,
                maximum: 12,
            },
            payment_cycle: PaymentCycle::monthly(),
        }
    }

    /// Parameters as they look after a customer renegotiates the schedule
    ///
    /// Monthly cycle paying on the Monday of the second week, balance of 10.
    pub fn adjusted_case_parameters() -> CaseParameters {
        CaseParameters {
            customer_identifier: Username().fake(),
            initial_balance: Decimal::TEN,
            term_range: TermRange {
                temporal_unit: PeriodUnit::Month,
                maximum: 24,
            },
            payment_cycle: PaymentCycle::monthly().aligned_on_day(1).aligned_on_week(2),
        }
    }
}

/// Fixture for account assignments
pub struct AssignmentFixtures;

impl AssignmentFixtures {
    pub fn customer_loan() -> AccountAssignment {
        AccountAssignment::new(designators::CUSTOMER_LOAN, IdFixtures::account("7010.loan.001"))
    }

    pub fn entry() -> AccountAssignment {
        AccountAssignment::new(designators::ENTRY, IdFixtures::account("1000.cash"))
    }

    pub fn standard() -> Vec<AccountAssignment> {
        vec![Self::customer_loan(), Self::entry()]
    }
}
