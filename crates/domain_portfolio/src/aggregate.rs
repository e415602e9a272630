//! Case Aggregate Root
//!
//! A case is one concrete instance of a product, for example a single loan.
//! The aggregate is the consistency boundary for its parameters, its account
//! assignments, its lifecycle state and its audit stamps.
//!
//! # Invariants
//!
//! - The product back-reference never changes
//! - `created_*` audit fields are written exactly once
//! - `last_modified_*` move on every accepted mutation, and only then
//! - States only move forward one step, or to `Cancelled`
//! - Closed and cancelled cases reject every mutation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Actor, AuditInfo, CaseId, ProductId};

use crate::account_assignment::AccountAssignmentSet;
use crate::error::PortfolioError;
use crate::events;
use crate::parameters::CaseParameters;

/// Case lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseState {
    /// Entered on successful creation
    Created,
    /// Opened and waiting for approval
    Pending,
    /// Approved, waiting for disbursement
    Approved,
    /// Disbursed and running
    Active,
    /// Terminal: repaid or written off
    Closed,
    /// Terminal: abandoned before closure
    Cancelled,
}

impl CaseState {
    /// All states, in lifecycle order
    pub const ALL: [CaseState; 6] = [
        CaseState::Created,
        CaseState::Pending,
        CaseState::Approved,
        CaseState::Active,
        CaseState::Closed,
        CaseState::Cancelled,
    ];

    /// Returns true for `Closed` and `Cancelled`
    pub fn is_terminal(&self) -> bool {
        matches!(self, CaseState::Closed | CaseState::Cancelled)
    }

    /// The next state along the forward path, if any
    pub fn successor(&self) -> Option<CaseState> {
        match self {
            CaseState::Created => Some(CaseState::Pending),
            CaseState::Pending => Some(CaseState::Approved),
            CaseState::Approved => Some(CaseState::Active),
            CaseState::Active => Some(CaseState::Closed),
            CaseState::Closed | CaseState::Cancelled => None,
        }
    }

    /// Returns true if `target` is reachable in one step from this state
    pub fn can_transition_to(&self, target: CaseState) -> bool {
        if self.is_terminal() {
            return false;
        }
        target == CaseState::Cancelled || self.successor() == Some(target)
    }

    /// Actions that may be applied to a case in this state
    pub fn allowed_actions(&self) -> Vec<CaseAction> {
        CaseAction::ALL
            .into_iter()
            .filter(|action| self.can_transition_to(action.target_state()))
            .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseState::Created => "CREATED",
            CaseState::Pending => "PENDING",
            CaseState::Approved => "APPROVED",
            CaseState::Active => "ACTIVE",
            CaseState::Closed => "CLOSED",
            CaseState::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for CaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named actions driving the state machine
///
/// Approval and disbursement workflows live outside the engine; they ask for
/// a transition by naming the action they performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseAction {
    Open,
    Approve,
    Disburse,
    Close,
    Cancel,
}

impl CaseAction {
    pub const ALL: [CaseAction; 5] = [
        CaseAction::Open,
        CaseAction::Approve,
        CaseAction::Disburse,
        CaseAction::Close,
        CaseAction::Cancel,
    ];

    /// The state a case ends up in after this action
    pub fn target_state(&self) -> CaseState {
        match self {
            CaseAction::Open => CaseState::Pending,
            CaseAction::Approve => CaseState::Approved,
            CaseAction::Disburse => CaseState::Active,
            CaseAction::Close => CaseState::Closed,
            CaseAction::Cancel => CaseState::Cancelled,
        }
    }

    /// The action that leads into `target`; `Created` has none
    pub fn leading_to(target: CaseState) -> Option<CaseAction> {
        CaseAction::ALL
            .into_iter()
            .find(|action| action.target_state() == target)
    }

    /// Event name announced when this action is applied
    pub fn event_name(&self) -> &'static str {
        match self {
            CaseAction::Open => events::OPEN_CASE,
            CaseAction::Approve => events::APPROVE_CASE,
            CaseAction::Disburse => events::DISBURSE_CASE,
            CaseAction::Close => events::CLOSE_CASE,
            CaseAction::Cancel => events::CANCEL_CASE,
        }
    }
}

/// The Case aggregate root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    identifier: CaseId,
    product_identifier: ProductId,
    current_state: CaseState,
    parameters: CaseParameters,
    account_assignments: AccountAssignmentSet,
    #[serde(flatten)]
    audit: AuditInfo,
}

impl Case {
    /// Creates a case in the `Created` state
    ///
    /// Parameters and assignments are expected to be validated already.
    pub fn create(
        product_identifier: ProductId,
        identifier: CaseId,
        parameters: CaseParameters,
        account_assignments: AccountAssignmentSet,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            identifier,
            product_identifier,
            current_state: CaseState::Created,
            parameters,
            account_assignments,
            audit: AuditInfo::created(actor, now),
        }
    }

    pub fn identifier(&self) -> &CaseId {
        &self.identifier
    }

    pub fn product_identifier(&self) -> &ProductId {
        &self.product_identifier
    }

    pub fn current_state(&self) -> CaseState {
        self.current_state
    }

    pub fn parameters(&self) -> &CaseParameters {
        &self.parameters
    }

    pub fn account_assignments(&self) -> &AccountAssignmentSet {
        &self.account_assignments
    }

    pub fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    pub fn created_by(&self) -> &Actor {
        self.audit.created_by()
    }

    pub fn created_on(&self) -> DateTime<Utc> {
        self.audit.created_on()
    }

    pub fn last_modified_by(&self) -> &Actor {
        self.audit.last_modified_by()
    }

    pub fn last_modified_on(&self) -> DateTime<Utc> {
        self.audit.last_modified_on()
    }

    /// Checks if the case is closed or cancelled
    pub fn is_terminal(&self) -> bool {
        self.current_state.is_terminal()
    }

    /// Replaces parameters and account assignments wholesale
    ///
    /// The lifecycle state is left as it is.
    ///
    /// # Errors
    ///
    /// Returns `TerminalState` if the case is closed or cancelled
    pub fn change(
        &mut self,
        parameters: CaseParameters,
        account_assignments: AccountAssignmentSet,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> Result<(), PortfolioError> {
        self.ensure_mutable()?;
        self.parameters = parameters;
        self.account_assignments = account_assignments;
        self.audit.touch(actor, now);
        Ok(())
    }

    /// Moves the case to `target`
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless `target` is the next forward state
    /// or `Cancelled`. Terminal cases accept no transition at all.
    pub fn transition_to(
        &mut self,
        target: CaseState,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> Result<CaseAction, PortfolioError> {
        let action = CaseAction::leading_to(target)
            .filter(|_| self.current_state.can_transition_to(target))
            .ok_or(PortfolioError::InvalidTransition {
                from: self.current_state,
                to: target,
            })?;

        self.current_state = target;
        self.audit.touch(actor, now);
        Ok(action)
    }

    fn ensure_mutable(&self) -> Result<(), PortfolioError> {
        if self.is_terminal() {
            return Err(PortfolioError::TerminalState {
                case_id: self.identifier.to_string(),
                state: self.current_state,
            });
        }
        Ok(())
    }
}
