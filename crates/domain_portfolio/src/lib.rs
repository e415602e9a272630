//! Portfolio Domain
//!
//! This crate implements the case lifecycle and validation engine of the
//! portfolio system: products that gate case creation, cases with their
//! parameters and account assignments, and the state machine that moves a
//! case from creation to closure.
//!
//! # Architecture
//!
//! The domain is infrastructure-agnostic. Persistence, event transport and
//! time are reached through ports:
//! - **Aggregates**: `Product`, `Case`
//! - **Value Objects**: `CaseParameters`, `PaymentCycle`, `AccountAssignmentSet`
//! - **Domain Services**: `ProductRegistry`, `CaseLifecycle`, `CasePager`
//! - **Ports**: `ProductRepository`, `CaseRepository`, `EventNotifier`
//!
//! # Case Lifecycle
//!
//! ```text
//! Created -> Pending -> Approved -> Active -> Closed
//!    \          \           \          \
//!     `----------`-----------`----------`--> Cancelled
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_portfolio::{PortfolioService, PortfolioConfig};
//!
//! let service = PortfolioService::in_memory(PortfolioConfig::default(), notifier, clock);
//! service.create_product(request, &actor).await?;
//! service.set_product_enabled(&product_id, true, &actor).await?;
//! let case = service.create_case(&product_id, &case_id, parameters, assignments, &actor).await?;
//! ```

pub mod account_assignment;
pub mod aggregate;
pub mod config;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod locks;
pub mod pager;
pub mod parameters;
pub mod pattern;
pub mod ports;
pub mod product;
pub mod services;

pub use account_assignment::{AccountAssignment, AccountAssignmentSet};
pub use aggregate::{Case, CaseAction, CaseState};
pub use config::PortfolioConfig;
pub use error::PortfolioError;
pub use events::{EventPayload, PortfolioEvent};
pub use lifecycle::CaseLifecycle;
pub use pager::{CasePage, CasePager};
pub use parameters::{CaseParameters, PaymentCycle, PeriodUnit, TermRange};
pub use pattern::Pattern;
pub use ports::{CaseRepository, EventNotifier, ProductRepository};
pub use product::{CreateProductRequest, Product, ProductRegistry};
pub use services::PortfolioService;
