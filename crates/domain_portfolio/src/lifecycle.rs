//! Case lifecycle service
//!
//! Orchestrates every mutation of a case: gating against the owning product,
//! parameter and assignment validation, per-case serialization, audit
//! stamping and event announcement.
//!
//! Writes to one `(product, case)` pair are serialized through a keyed lock;
//! writes to different cases run in parallel. Nothing is stored unless every
//! check passed. Events are announced after the lock is released.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use core_kernel::{Actor, CaseId, Clock, ProductId};

use crate::account_assignment::{AccountAssignment, AccountAssignmentSet};
use crate::aggregate::{Case, CaseAction, CaseState};
use crate::error::PortfolioError;
use crate::events::{self, PortfolioEvent};
use crate::locks::KeyedLocks;
use crate::parameters::CaseParameters;
use crate::ports::{CaseRepository, EventNotifier};
use crate::product::{Product, ProductRegistry};

/// Creates, changes and transitions cases
pub struct CaseLifecycle {
    products: Arc<ProductRegistry>,
    cases: Arc<dyn CaseRepository>,
    notifier: Arc<dyn EventNotifier>,
    clock: Arc<dyn Clock>,
    locks: KeyedLocks<(ProductId, CaseId)>,
}

impl CaseLifecycle {
    pub fn new(
        products: Arc<ProductRegistry>,
        cases: Arc<dyn CaseRepository>,
        notifier: Arc<dyn EventNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            products,
            cases,
            notifier,
            clock,
            locks: KeyedLocks::new(),
        }
    }

    /// Creates a case in the `Created` state
    ///
    /// The product's enabled flag is read once, at the start of the call.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the product is unknown
    /// - `ProductNotEnabled` if the product is disabled
    /// - `Validation` for malformed parameters or conflicting assignments
    /// - `Duplicate` if the case identifier is already taken
    #[instrument(skip(self, parameters, assignments))]
    pub async fn create_case(
        &self,
        product_id: &ProductId,
        case_id: &CaseId,
        parameters: CaseParameters,
        assignments: Vec<AccountAssignment>,
        actor: &Actor,
    ) -> Result<Case, PortfolioError> {
        let product = self.products.get_product(product_id).await?;
        if !product.is_enabled() {
            warn!(product_id = %product_id, "Case creation rejected, product disabled");
            return Err(PortfolioError::ProductNotEnabled(product_id.to_string()));
        }
        let (parameters, assignments) = prepare(&product, parameters, assignments)?;

        let guard = self.locks.lock((product_id.clone(), case_id.clone())).await;
        match self.cases.get_case(product_id, case_id).await {
            Ok(_) => return Err(PortfolioError::duplicate("Case", case_id)),
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err.into()),
        }

        let case = Case::create(
            product_id.clone(),
            case_id.clone(),
            parameters,
            assignments,
            actor,
            self.clock.now(),
        );
        self.cases.put_case(&case).await?;
        drop(guard);

        info!(product_id = %product_id, case_id = %case_id, actor = %actor, "Case created");
        events::announce(
            self.notifier.as_ref(),
            PortfolioEvent::CaseCreated {
                product_id: product_id.clone(),
                case_id: case_id.clone(),
            },
        )
        .await;
        Ok(case)
    }

    /// Replaces a case's parameters and account assignments wholesale
    ///
    /// An empty assignment list clears every prior assignment. The owning
    /// product must still exist but does not have to be enabled.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the product or the case is unknown
    /// - `TerminalState` if the case is closed or cancelled
    /// - `Validation` for malformed parameters or conflicting assignments
    #[instrument(skip(self, parameters, assignments))]
    pub async fn change_case(
        &self,
        product_id: &ProductId,
        case_id: &CaseId,
        parameters: CaseParameters,
        assignments: Vec<AccountAssignment>,
        actor: &Actor,
    ) -> Result<Case, PortfolioError> {
        let product = self.products.get_product(product_id).await?;

        let guard = self.locks.lock((product_id.clone(), case_id.clone())).await;
        let mut case = self.cases.get_case(product_id, case_id).await?;
        if case.is_terminal() {
            warn!(case_id = %case_id, state = %case.current_state(), "Change rejected on terminal case");
            return Err(PortfolioError::TerminalState {
                case_id: case_id.to_string(),
                state: case.current_state(),
            });
        }
        let (parameters, assignments) = prepare(&product, parameters, assignments)?;

        case.change(parameters, assignments, actor, self.clock.now())?;
        self.cases.put_case(&case).await?;
        drop(guard);

        info!(product_id = %product_id, case_id = %case_id, actor = %actor, "Case changed");
        events::announce(
            self.notifier.as_ref(),
            PortfolioEvent::CaseChanged {
                product_id: product_id.clone(),
                case_id: case_id.clone(),
            },
        )
        .await;
        Ok(case)
    }

    /// Moves a case to `target`
    ///
    /// # Errors
    ///
    /// - `NotFound` if the case is unknown
    /// - `InvalidTransition` unless `target` is the next forward state or
    ///   `Cancelled`; terminal cases accept no transition
    #[instrument(skip(self))]
    pub async fn transition(
        &self,
        product_id: &ProductId,
        case_id: &CaseId,
        target: CaseState,
        actor: &Actor,
    ) -> Result<Case, PortfolioError> {
        let guard = self.locks.lock((product_id.clone(), case_id.clone())).await;
        let mut case = self.cases.get_case(product_id, case_id).await?;
        let from = case.current_state();

        let action = case
            .transition_to(target, actor, self.clock.now())
            .map_err(|err| {
                warn!(case_id = %case_id, from = %from, to = %target, "Transition rejected");
                err
            })?;
        self.cases.put_case(&case).await?;
        drop(guard);

        info!(
            product_id = %product_id,
            case_id = %case_id,
            from = %from,
            to = %target,
            actor = %actor,
            "Case transitioned"
        );
        events::announce(
            self.notifier.as_ref(),
            PortfolioEvent::CaseTransitioned {
                product_id: product_id.clone(),
                case_id: case_id.clone(),
                action,
            },
        )
        .await;
        Ok(case)
    }

    /// Applies a named action, see [`CaseAction::target_state`]
    pub async fn apply_action(
        &self,
        product_id: &ProductId,
        case_id: &CaseId,
        action: CaseAction,
        actor: &Actor,
    ) -> Result<Case, PortfolioError> {
        self.transition(product_id, case_id, action.target_state(), actor)
            .await
    }

    pub async fn get_case(
        &self,
        product_id: &ProductId,
        case_id: &CaseId,
    ) -> Result<Case, PortfolioError> {
        debug!(product_id = %product_id, case_id = %case_id, "Reading case");
        Ok(self.cases.get_case(product_id, case_id).await?)
    }
}

/// Validates caller input against the owning product
fn prepare(
    product: &Product,
    parameters: CaseParameters,
    assignments: Vec<AccountAssignment>,
) -> Result<(CaseParameters, AccountAssignmentSet), PortfolioError> {
    let parameters = parameters.normalized(product.minor_currency_unit_digits())?;
    let assignments = AccountAssignmentSet::from_assignments(assignments)?;
    Ok((parameters, assignments))
}
