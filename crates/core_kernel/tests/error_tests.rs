//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::identifiers::IdentifierError;
use core_kernel::money::MoneyError;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_configuration() {
    let error = CoreError::configuration("max_page_size must be positive");
    assert!(error.to_string().contains("max_page_size"));
}

#[test]
fn test_core_error_from_money_error() {
    let core_error: CoreError = MoneyError::InvalidCurrency("usd".to_string()).into();

    match core_error {
        CoreError::Money(MoneyError::InvalidCurrency(code)) => assert_eq!(code, "usd"),
        _ => panic!("Expected Money error"),
    }
}

#[test]
fn test_core_error_from_identifier_error() {
    let core_error: CoreError = IdentifierError::Empty { kind: "Case" }.into();

    assert!(matches!(core_error, CoreError::Identifier(_)));
    assert!(core_error.to_string().contains("Case identifier must not be empty"));
}
