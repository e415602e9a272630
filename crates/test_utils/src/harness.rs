//! In-memory engine harness
//!
//! Wires a [`PortfolioService`] to in-memory repositories, a recording
//! notifier and a [`FixedClock`] the test can move.

use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;

use core_kernel::{CaseId, DomainPort, FixedClock, PortError, ProductId};
use domain_portfolio::ports::memory::{
    InMemoryCaseRepository, InMemoryProductRepository, RecordingNotifier,
};
use domain_portfolio::{
    Case, CaseRepository, EventNotifier, EventPayload, PortfolioConfig, PortfolioService, Product,
};

use crate::builders::TestProductRequestBuilder;
use crate::fixtures::{ActorFixtures, TemporalFixtures};

/// A service plus handles to the collaborators it was built with
pub struct TestPortfolio {
    pub service: PortfolioService,
    pub notifier: Arc<RecordingNotifier>,
    pub clock: FixedClock,
}

impl TestPortfolio {
    pub fn new() -> Self {
        Self::with_config(PortfolioConfig::default())
    }

    pub fn with_config(config: PortfolioConfig) -> Self {
        Self::with_case_repository(config, Arc::new(InMemoryCaseRepository::new()))
    }

    /// Case reads stall before returning, so concurrent read-modify-write
    /// cycles on one case overlap unless the engine serializes them
    pub fn with_slow_case_reads() -> Self {
        Self::with_case_repository(
            PortfolioConfig::default(),
            Arc::new(SlowCaseRepository::new(std::time::Duration::from_millis(20))),
        )
    }

    pub fn with_case_repository(config: PortfolioConfig, cases: Arc<dyn CaseRepository>) -> Self {
        let notifier = Arc::new(RecordingNotifier::new());
        let clock = FixedClock::at(TemporalFixtures::epoch());
        let service = PortfolioService::new(
            config,
            Arc::new(InMemoryProductRepository::new()),
            cases,
            notifier.clone(),
            Arc::new(clock.clone()),
        )
        .unwrap();
        Self {
            service,
            notifier,
            clock,
        }
    }

    /// Moves the clock forward by whole seconds
    pub fn tick(&self, seconds: i64) {
        self.clock.advance(Duration::seconds(seconds));
    }

    /// Creates a product with a random identifier, still disabled
    pub async fn create_product(&self) -> Product {
        self.service
            .create_product(TestProductRequestBuilder::new().build(), &ActorFixtures::fred())
            .await
            .unwrap()
    }

    /// Creates and enables a product with a random identifier
    pub async fn create_and_enable_product(&self) -> ProductId {
        let product = self.create_product().await;
        self.service
            .set_product_enabled(product.identifier(), true, &ActorFixtures::fred())
            .await
            .unwrap();
        product.identifier().clone()
    }
}

impl Default for TestPortfolio {
    fn default() -> Self {
        Self::new()
    }
}

/// Notifier whose delivery always fails
#[derive(Debug, Default)]
pub struct FailingNotifier;

impl DomainPort for FailingNotifier {}

#[async_trait]
impl EventNotifier for FailingNotifier {
    async fn notify(&self, event_name: &str, _payload: EventPayload) -> Result<(), PortError> {
        Err(PortError::connection(format!("broker unavailable for {}", event_name)))
    }
}

/// In-memory case repository that sleeps after every read
#[derive(Debug)]
pub struct SlowCaseRepository {
    inner: InMemoryCaseRepository,
    delay: std::time::Duration,
}

impl SlowCaseRepository {
    pub fn new(delay: std::time::Duration) -> Self {
        Self {
            inner: InMemoryCaseRepository::new(),
            delay,
        }
    }
}

impl DomainPort for SlowCaseRepository {}

#[async_trait]
impl CaseRepository for SlowCaseRepository {
    async fn get_case(&self, product_id: &ProductId, case_id: &CaseId) -> Result<Case, PortError> {
        let result = self.inner.get_case(product_id, case_id).await;
        tokio::time::sleep(self.delay).await;
        result
    }

    async fn put_case(&self, case: &Case) -> Result<(), PortError> {
        self.inner.put_case(case).await
    }

    async fn list_cases(&self, product_id: &ProductId) -> Result<Vec<Case>, PortError> {
        self.inner.list_cases(product_id).await
    }
}
