//! Strongly-typed identifiers for domain entities
//!
//! Products, cases and ledger accounts are all addressed by caller-chosen
//! string identifiers. Wrapping them in newtypes keeps a case identifier from
//! being passed where a product identifier is expected, and every constructor
//! enforces the same URL-safe format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Longest identifier accepted anywhere in the system
pub const MAX_IDENTIFIER_LENGTH: usize = 32;

/// Errors raised when parsing an identifier
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("{kind} identifier must not be empty")]
    Empty { kind: &'static str },

    #[error("{kind} identifier '{value}' exceeds {max} characters", max = MAX_IDENTIFIER_LENGTH)]
    TooLong { kind: &'static str, value: String },

    #[error("{kind} identifier '{value}' contains characters that are not URL-safe")]
    InvalidCharacters { kind: &'static str, value: String },
}

fn is_url_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~')
}

fn check_identifier(kind: &'static str, value: &str) -> Result<(), IdentifierError> {
    if value.is_empty() {
        return Err(IdentifierError::Empty { kind });
    }
    if value.chars().count() > MAX_IDENTIFIER_LENGTH {
        return Err(IdentifierError::TooLong { kind, value: value.to_string() });
    }
    if !value.chars().all(is_url_safe) {
        return Err(IdentifierError::InvalidCharacters { kind, value: value.to_string() });
    }
    Ok(())
}

macro_rules! define_id {
    ($name:ident, $kind:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier, rejecting empty, over-long or non URL-safe values
            pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
                let value = value.into();
                check_identifier($kind, &value)?;
                Ok(Self(value))
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the entity kind used in error messages
            pub fn kind() -> &'static str {
                $kind
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId, "Product");
define_id!(CaseId, "Case");
define_id!(AccountIdentifier, "Account");
