//! Domain events announced by the portfolio engine
//!
//! Events are announced after the state change they describe has been
//! committed. The engine hands each event to an [`EventNotifier`] as a stable
//! event name plus a small payload, and does not care how it is delivered.
//! A failing notifier is logged and otherwise ignored: the committed change
//! stands.

use serde::{Deserialize, Serialize};
use tracing::warn;

use core_kernel::{CaseId, ProductId};

use crate::aggregate::CaseAction;
use crate::ports::EventNotifier;

pub const POST_PRODUCT: &str = "post-product";
pub const PUT_PRODUCT_ENABLE: &str = "put-enable";
pub const POST_CASE: &str = "post-case";
pub const PUT_CASE: &str = "put-case";
pub const OPEN_CASE: &str = "open-case";
pub const APPROVE_CASE: &str = "approve-case";
pub const DISBURSE_CASE: &str = "disburse-case";
pub const CLOSE_CASE: &str = "close-case";
pub const CANCEL_CASE: &str = "cancel-case";

/// Identifies the object an event is about
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<CaseId>,
}

impl EventPayload {
    pub fn product(product_id: ProductId) -> Self {
        Self { product_id, case_id: None }
    }

    pub fn case(product_id: ProductId, case_id: CaseId) -> Self {
        Self { product_id, case_id: Some(case_id) }
    }
}

/// Domain events emitted by products and cases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortfolioEvent {
    ProductCreated {
        product_id: ProductId,
    },

    /// Only emitted when the flag actually changed
    ProductEnablementChanged {
        product_id: ProductId,
        enabled: bool,
    },

    CaseCreated {
        product_id: ProductId,
        case_id: CaseId,
    },

    CaseChanged {
        product_id: ProductId,
        case_id: CaseId,
    },

    CaseTransitioned {
        product_id: ProductId,
        case_id: CaseId,
        action: CaseAction,
    },
}

impl PortfolioEvent {
    /// Returns the wire-level event name
    pub fn name(&self) -> &'static str {
        match self {
            PortfolioEvent::ProductCreated { .. } => POST_PRODUCT,
            PortfolioEvent::ProductEnablementChanged { .. } => PUT_PRODUCT_ENABLE,
            PortfolioEvent::CaseCreated { .. } => POST_CASE,
            PortfolioEvent::CaseChanged { .. } => PUT_CASE,
            PortfolioEvent::CaseTransitioned { action, .. } => action.event_name(),
        }
    }

    /// Returns the product the event is about
    pub fn product_id(&self) -> &ProductId {
        match self {
            PortfolioEvent::ProductCreated { product_id } => product_id,
            PortfolioEvent::ProductEnablementChanged { product_id, .. } => product_id,
            PortfolioEvent::CaseCreated { product_id, .. } => product_id,
            PortfolioEvent::CaseChanged { product_id, .. } => product_id,
            PortfolioEvent::CaseTransitioned { product_id, .. } => product_id,
        }
    }

    /// Returns the case the event is about, if any
    pub fn case_id(&self) -> Option<&CaseId> {
        match self {
            PortfolioEvent::ProductCreated { .. }
            | PortfolioEvent::ProductEnablementChanged { .. } => None,
            PortfolioEvent::CaseCreated { case_id, .. }
            | PortfolioEvent::CaseChanged { case_id, .. }
            | PortfolioEvent::CaseTransitioned { case_id, .. } => Some(case_id),
        }
    }

    pub fn payload(&self) -> EventPayload {
        EventPayload {
            product_id: self.product_id().clone(),
            case_id: self.case_id().cloned(),
        }
    }
}

/// Hands a committed event to the notifier, logging delivery failures
pub(crate) async fn announce(notifier: &dyn EventNotifier, event: PortfolioEvent) {
    let name = event.name();
    if let Err(err) = notifier.notify(name, event.payload()).await {
        warn!(
            event = name,
            product_id = %event.product_id(),
            error = %err,
            "Event notification failed; committed change is kept"
        );
    }
}
