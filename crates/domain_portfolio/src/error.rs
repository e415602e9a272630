//! Portfolio domain errors
//!
//! Every operation of the portfolio engine returns one of these kinds to its
//! immediate caller. None of them is retried inside the engine. The transport
//! layer maps [`PortfolioError::code`] to its own status values.

use thiserror::Error;

use core_kernel::{CoreError, IdentifierError, MoneyError, PortError};

use crate::aggregate::CaseState;

/// Errors that can occur in the portfolio domain
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// Unknown product or case
    #[error("{entity} not found: {id}")]
    NotFound {
        entity: String,
        id: String,
    },

    /// Identifier collision on create
    #[error("{entity} already exists: {id}")]
    Duplicate {
        entity: String,
        id: String,
    },

    /// Case creation against a disabled product
    #[error("Product {0} is not enabled")]
    ProductNotEnabled(String),

    /// Mutation attempted on a closed or cancelled case
    #[error("Case {case_id} is {state} and can no longer be changed")]
    TerminalState {
        case_id: String,
        state: CaseState,
    },

    /// Illegal state move
    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition {
        from: CaseState,
        to: CaseState,
    },

    /// Malformed parameters, duplicate roles, out-of-range alignment values
    #[error("Validation error: {0}")]
    Validation(String),

    /// A collaborator (repository) failed
    #[error("Repository error: {0}")]
    Repository(PortError),
}

impl PortfolioError {
    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortfolioError::Validation(message.into())
    }

    /// Creates a not found error
    pub fn not_found(entity: impl Into<String>, id: impl std::fmt::Display) -> Self {
        PortfolioError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a duplicate error
    pub fn duplicate(entity: impl Into<String>, id: impl std::fmt::Display) -> Self {
        PortfolioError::Duplicate {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Stable machine-readable code for this error kind
    pub fn code(&self) -> &'static str {
        match self {
            PortfolioError::NotFound { .. } => "not_found",
            PortfolioError::Duplicate { .. } => "duplicate",
            PortfolioError::ProductNotEnabled(_) => "product_not_enabled",
            PortfolioError::TerminalState { .. } => "terminal_state",
            PortfolioError::InvalidTransition { .. } => "invalid_transition",
            PortfolioError::Validation(_) => "validation",
            PortfolioError::Repository(_) => "repository_failure",
        }
    }
}

impl From<PortError> for PortfolioError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { entity_type, id } => PortfolioError::NotFound {
                entity: entity_type,
                id,
            },
            other => PortfolioError::Repository(other),
        }
    }
}

impl From<IdentifierError> for PortfolioError {
    fn from(err: IdentifierError) -> Self {
        PortfolioError::Validation(err.to_string())
    }
}

impl From<MoneyError> for PortfolioError {
    fn from(err: MoneyError) -> Self {
        PortfolioError::Validation(err.to_string())
    }
}

impl From<CoreError> for PortfolioError {
    fn from(err: CoreError) -> Self {
        PortfolioError::Validation(err.to_string())
    }
}

impl From<validator::ValidationErrors> for PortfolioError {
    fn from(err: validator::ValidationErrors) -> Self {
        PortfolioError::Validation(err.to_string())
    }
}
