//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use rust_decimal::Decimal;

use core_kernel::{CurrencyCode, ProductId};
use domain_portfolio::{
    AccountAssignment, CaseParameters, CreateProductRequest, PaymentCycle, PeriodUnit, TermRange,
};

use crate::fixtures::{AssignmentFixtures, IdFixtures, ParameterFixtures, ProductFixtures};

/// Builder for product creation requests
pub struct TestProductRequestBuilder {
    request: CreateProductRequest,
}

impl Default for TestProductRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProductRequestBuilder {
    /// Creates a new builder with a random identifier
    pub fn new() -> Self {
        Self {
            request: ProductFixtures::create_product_request(IdFixtures::unique_product_id()),
        }
    }

    pub fn with_identifier(mut self, identifier: ProductId) -> Self {
        self.request.identifier = identifier;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.request.name = name.into();
        self
    }

    pub fn with_pattern_package(mut self, package: impl Into<String>) -> Self {
        self.request.pattern_package = package.into();
        self
    }

    pub fn with_currency(mut self, code: &str) -> Self {
        self.request.currency_code = CurrencyCode::new(code).unwrap();
        self
    }

    /// Sets the balance scale; `None` falls back to the configured default
    pub fn with_minor_digits(mut self, digits: Option<u32>) -> Self {
        self.request.minor_currency_unit_digits = digits;
        self
    }

    pub fn build(self) -> CreateProductRequest {
        self.request
    }
}

/// Builder for case parameter documents
pub struct TestCaseParametersBuilder {
    parameters: CaseParameters,
}

impl Default for TestCaseParametersBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCaseParametersBuilder {
    pub fn new() -> Self {
        Self {
            parameters: ParameterFixtures::case_parameters(),
        }
    }

    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.parameters.customer_identifier = customer.into();
        self
    }

    pub fn with_initial_balance(mut self, balance: Decimal) -> Self {
        self.parameters.initial_balance = balance;
        self
    }

    pub fn with_term(mut self, unit: PeriodUnit, maximum: u32) -> Self {
        self.parameters.term_range = TermRange {
            temporal_unit: unit,
            maximum,
        };
        self
    }

    pub fn with_payment_cycle(mut self, cycle: PaymentCycle) -> Self {
        self.parameters.payment_cycle = cycle;
        self
    }

    pub fn build(self) -> CaseParameters {
        self.parameters
    }
}

/// Builder for assignment lists, including deliberately invalid ones
#[derive(Default)]
pub struct TestAssignmentsBuilder {
    assignments: Vec<AccountAssignment>,
}

impl TestAssignmentsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the standard customer loan and entry assignments
    pub fn standard() -> Self {
        Self {
            assignments: AssignmentFixtures::standard(),
        }
    }

    pub fn assign(mut self, designator: &str, account: &str) -> Self {
        self.assignments
            .push(AccountAssignment::new(designator, IdFixtures::account(account)));
        self
    }

    pub fn build(self) -> Vec<AccountAssignment> {
        self.assignments
    }
}
