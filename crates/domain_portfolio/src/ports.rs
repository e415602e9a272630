//! Portfolio Domain Ports
//!
//! The engine consumes three collaborators:
//!
//! - [`ProductRepository`] and [`CaseRepository`]: the durable source of truth.
//!   Storage technology is the adapter's concern.
//! - [`EventNotifier`]: announces accepted changes. Delivery guarantees are the
//!   adapter's concern.
//!
//! The [`memory`] module provides in-process adapters used by the default
//! service wiring and by the test suite.
//!
//! # Usage
//!
//! ```rust,ignore
//! let cases: Arc<dyn CaseRepository> = Arc::new(InMemoryCaseRepository::new());
//! let lifecycle = CaseLifecycle::new(registry, cases, notifier, clock);
//! ```

use async_trait::async_trait;

use core_kernel::{CaseId, DomainPort, PortError, ProductId};

use crate::aggregate::Case;
use crate::events::EventPayload;
use crate::product::Product;

/// Storage for products
#[async_trait]
pub trait ProductRepository: DomainPort {
    /// Retrieves a product, or `PortError::NotFound`
    async fn get_product(&self, id: &ProductId) -> Result<Product, PortError>;

    /// Inserts or overwrites a product
    async fn put_product(&self, product: &Product) -> Result<(), PortError>;

    /// Lists all products ordered by identifier
    async fn list_products(&self) -> Result<Vec<Product>, PortError>;
}

/// Storage for cases
///
/// `put_case` must store the whole case atomically: a concurrent reader sees
/// either the previous or the new version, never a mix.
#[async_trait]
pub trait CaseRepository: DomainPort {
    /// Retrieves a case, or `PortError::NotFound`
    async fn get_case(&self, product_id: &ProductId, case_id: &CaseId) -> Result<Case, PortError>;

    /// Inserts or overwrites a case
    async fn put_case(&self, case: &Case) -> Result<(), PortError>;

    /// Point-in-time snapshot of every case of a product
    async fn list_cases(&self, product_id: &ProductId) -> Result<Vec<Case>, PortError>;
}

/// Announces accepted state changes
#[async_trait]
pub trait EventNotifier: DomainPort {
    async fn notify(&self, event_name: &str, payload: EventPayload) -> Result<(), PortError>;
}

/// In-memory adapters
pub mod memory {
    use super::*;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use tracing::info;

    /// In-memory implementation of ProductRepository
    #[derive(Debug, Default)]
    pub struct InMemoryProductRepository {
        products: Arc<RwLock<BTreeMap<ProductId, Product>>>,
    }

    impl InMemoryProductRepository {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl DomainPort for InMemoryProductRepository {}

    #[async_trait]
    impl ProductRepository for InMemoryProductRepository {
        async fn get_product(&self, id: &ProductId) -> Result<Product, PortError> {
            self.products
                .read()
                .await
                .get(id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Product", id))
        }

        async fn put_product(&self, product: &Product) -> Result<(), PortError> {
            self.products
                .write()
                .await
                .insert(product.identifier().clone(), product.clone());
            Ok(())
        }

        async fn list_products(&self) -> Result<Vec<Product>, PortError> {
            Ok(self.products.read().await.values().cloned().collect())
        }
    }

    /// In-memory implementation of CaseRepository
    #[derive(Debug, Default)]
    pub struct InMemoryCaseRepository {
        cases: Arc<RwLock<HashMap<ProductId, BTreeMap<CaseId, Case>>>>,
    }

    impl InMemoryCaseRepository {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl DomainPort for InMemoryCaseRepository {}

    #[async_trait]
    impl CaseRepository for InMemoryCaseRepository {
        async fn get_case(&self, product_id: &ProductId, case_id: &CaseId) -> Result<Case, PortError> {
            self.cases
                .read()
                .await
                .get(product_id)
                .and_then(|cases| cases.get(case_id))
                .cloned()
                .ok_or_else(|| PortError::not_found("Case", case_id))
        }

        async fn put_case(&self, case: &Case) -> Result<(), PortError> {
            self.cases
                .write()
                .await
                .entry(case.product_identifier().clone())
                .or_default()
                .insert(case.identifier().clone(), case.clone());
            Ok(())
        }

        async fn list_cases(&self, product_id: &ProductId) -> Result<Vec<Case>, PortError> {
            Ok(self
                .cases
                .read()
                .await
                .get(product_id)
                .map(|cases| cases.values().cloned().collect())
                .unwrap_or_default())
        }
    }

    /// Notifier that only writes events to the log
    #[derive(Debug, Default, Clone, Copy)]
    pub struct TracingNotifier;

    impl DomainPort for TracingNotifier {}

    #[async_trait]
    impl EventNotifier for TracingNotifier {
        async fn notify(&self, event_name: &str, payload: EventPayload) -> Result<(), PortError> {
            info!(
                event = event_name,
                product_id = %payload.product_id,
                case_id = ?payload.case_id.as_ref().map(|id| id.as_str()),
                "Portfolio event"
            );
            Ok(())
        }
    }

    /// Notifier that keeps every event it receives
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        events: Arc<RwLock<Vec<(String, EventPayload)>>>,
    }

    impl RecordingNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        /// All recorded events in delivery order
        pub async fn events(&self) -> Vec<(String, EventPayload)> {
            self.events.read().await.clone()
        }

        /// Number of times `event_name` was announced for `payload`
        pub async fn count(&self, event_name: &str, payload: &EventPayload) -> usize {
            self.events
                .read()
                .await
                .iter()
                .filter(|(name, recorded)| name == event_name && recorded == payload)
                .count()
        }

        /// Returns true if `event_name` was announced for `payload` at least once
        pub async fn contains(&self, event_name: &str, payload: &EventPayload) -> bool {
            self.count(event_name, payload).await > 0
        }
    }

    impl DomainPort for RecordingNotifier {}

    #[async_trait]
    impl EventNotifier for RecordingNotifier {
        async fn notify(&self, event_name: &str, payload: EventPayload) -> Result<(), PortError> {
            self.events.write().await.push((event_name.to_string(), payload));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::*;
    use super::*;

    #[tokio::test]
    async fn test_unknown_case_is_not_found() {
        let repository = InMemoryCaseRepository::new();
        let result = repository
            .get_case(&ProductId::new("p").unwrap(), &CaseId::new("c").unwrap())
            .await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_cases_of_unknown_product_is_empty() {
        let repository = InMemoryCaseRepository::new();
        let cases = repository.list_cases(&ProductId::new("p").unwrap()).await.unwrap();
        assert!(cases.is_empty());
    }

    #[tokio::test]
    async fn test_tracing_notifier_never_fails() {
        let payload = EventPayload::case(ProductId::new("p").unwrap(), CaseId::new("c").unwrap());
        assert!(TracingNotifier.notify("post-case", payload).await.is_ok());
    }

    #[tokio::test]
    async fn test_recording_notifier_counts() {
        let notifier = RecordingNotifier::new();
        let payload = EventPayload::product(ProductId::new("p").unwrap());
        notifier.notify("put-enable", payload.clone()).await.unwrap();
        notifier.notify("put-enable", payload.clone()).await.unwrap();

        assert_eq!(notifier.count("put-enable", &payload).await, 2);
        assert!(!notifier.contains("post-case", &payload).await);
    }
}
