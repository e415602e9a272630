//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use chrono::{DateTime, Duration, Utc};

use domain_portfolio::{AccountAssignment, AccountAssignmentSet, Case, CaseParameters, PortfolioError};

/// Asserts that `actual` lies within `tolerance` of `expected`
pub fn assert_roughly_at(actual: DateTime<Utc>, expected: DateTime<Utc>, tolerance: Duration) {
    let diff = if actual > expected { actual - expected } else { expected - actual };
    assert!(
        diff <= tolerance,
        "Timestamp {} is not within {}s of {}",
        actual,
        tolerance.num_seconds(),
        expected
    );
}

/// Asserts that a timestamp was taken within the last few seconds of wall time
pub fn assert_roughly_now(actual: DateTime<Utc>) {
    assert_roughly_at(actual, Utc::now(), Duration::seconds(5));
}

/// Asserts that a stored case carries exactly the given content
pub fn assert_case_content(
    case: &Case,
    parameters: &CaseParameters,
    assignments: &[AccountAssignment],
) {
    assert_eq!(case.parameters(), parameters, "Parameters differ for case {}", case.identifier());

    let expected = AccountAssignmentSet::from_assignments(assignments.to_vec())
        .expect("expected assignments must be valid");
    assert_eq!(
        case.account_assignments(),
        &expected,
        "Assignments differ for case {}",
        case.identifier()
    );
}

/// Asserts that creation stamps survived a mutation and modification stamps moved
pub fn assert_audit_advanced(before: &Case, after: &Case) {
    assert_eq!(after.created_by(), before.created_by(), "created_by changed");
    assert_eq!(after.created_on(), before.created_on(), "created_on changed");
    assert!(
        after.last_modified_on() > before.last_modified_on(),
        "last_modified_on did not advance: {} -> {}",
        before.last_modified_on(),
        after.last_modified_on()
    );
}

/// Asserts that a result failed with the given error code
pub fn assert_error_code<T: std::fmt::Debug>(result: Result<T, PortfolioError>, code: &str) {
    match result {
        Ok(value) => panic!("Expected {} error, got Ok({:?})", code, value),
        Err(err) => assert_eq!(err.code(), code, "Unexpected error: {}", err),
    }
}
