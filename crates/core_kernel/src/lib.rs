//! Core Kernel - Foundational types and utilities for the portfolio system
//!
//! This crate provides the building blocks shared by the portfolio domain:
//! - Validated identifiers for products, cases and ledger accounts
//! - Audit stamping (actor identity, injected clocks)
//! - Fixed-scale decimal amounts and currency codes
//! - Port error types used by every adapter

pub mod money;
pub mod temporal;
pub mod audit;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Amount, CurrencyCode, MoneyError, MAX_MINOR_CURRENCY_DIGITS};
pub use temporal::{Clock, SystemClock, FixedClock};
pub use audit::{Actor, AuditInfo};
pub use identifiers::{ProductId, CaseId, AccountIdentifier, IdentifierError, MAX_IDENTIFIER_LENGTH};
pub use ports::{PortError, DomainPort};
pub use error::CoreError;
