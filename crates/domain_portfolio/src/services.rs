//! Portfolio service facade
//!
//! Wires the product registry, the case lifecycle and the pager to shared
//! repositories, notifier and clock, and exposes the public operations of
//! the engine in one place.

use std::sync::Arc;
use tracing::info;

use core_kernel::{Actor, CaseId, Clock, CoreError, ProductId};

use crate::account_assignment::AccountAssignment;
use crate::aggregate::{Case, CaseAction, CaseState};
use crate::config::PortfolioConfig;
use crate::error::PortfolioError;
use crate::lifecycle::CaseLifecycle;
use crate::pager::{CasePage, CasePager};
use crate::parameters::CaseParameters;
use crate::pattern::Pattern;
use crate::ports::memory::{InMemoryCaseRepository, InMemoryProductRepository};
use crate::ports::{CaseRepository, EventNotifier, ProductRepository};
use crate::product::{CreateProductRequest, Product, ProductRegistry};

/// Entry point to the portfolio engine
pub struct PortfolioService {
    registry: Arc<ProductRegistry>,
    lifecycle: CaseLifecycle,
    pager: CasePager,
}

impl PortfolioService {
    /// Creates a service over the given collaborators
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` is inconsistent
    pub fn new(
        config: PortfolioConfig,
        products: Arc<dyn ProductRepository>,
        cases: Arc<dyn CaseRepository>,
        notifier: Arc<dyn EventNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CoreError> {
        config.validate()?;

        let registry = Arc::new(ProductRegistry::new(
            products,
            notifier.clone(),
            clock.clone(),
            config.default_minor_currency_digits,
        ));
        let lifecycle = CaseLifecycle::new(registry.clone(), cases.clone(), notifier, clock);
        let pager = CasePager::new(
            registry.clone(),
            cases,
            config.default_page_size,
            config.max_page_size,
        );

        info!(
            default_page_size = config.default_page_size,
            max_page_size = config.max_page_size,
            "Portfolio service initialized"
        );
        Ok(Self {
            registry,
            lifecycle,
            pager,
        })
    }

    /// Creates a service backed by in-memory repositories
    pub fn in_memory(
        config: PortfolioConfig,
        notifier: Arc<dyn EventNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CoreError> {
        Self::new(
            config,
            Arc::new(InMemoryProductRepository::new()),
            Arc::new(InMemoryCaseRepository::new()),
            notifier,
            clock,
        )
    }

    /// Creates an in-memory service configured from `PORTFOLIO_*` variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the variables cannot be parsed or
    /// describe an inconsistent configuration
    pub fn in_memory_from_env(
        notifier: Arc<dyn EventNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CoreError> {
        Self::in_memory(PortfolioConfig::from_env()?, notifier, clock)
    }

    // Products

    pub async fn create_product(
        &self,
        request: CreateProductRequest,
        actor: &Actor,
    ) -> Result<Product, PortfolioError> {
        self.registry.create_product(request, actor).await
    }

    pub async fn get_product(&self, product_id: &ProductId) -> Result<Product, PortfolioError> {
        self.registry.get_product(product_id).await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, PortfolioError> {
        self.registry.list_products().await
    }

    pub async fn is_product_enabled(&self, product_id: &ProductId) -> Result<bool, PortfolioError> {
        self.registry.is_enabled(product_id).await
    }

    pub async fn set_product_enabled(
        &self,
        product_id: &ProductId,
        enabled: bool,
        actor: &Actor,
    ) -> Result<Product, PortfolioError> {
        self.registry.set_enabled(product_id, enabled, actor).await
    }

    pub fn list_patterns(&self) -> Vec<Pattern> {
        self.registry.list_patterns()
    }

    // Cases

    pub async fn create_case(
        &self,
        product_id: &ProductId,
        case_id: &CaseId,
        parameters: CaseParameters,
        assignments: Vec<AccountAssignment>,
        actor: &Actor,
    ) -> Result<Case, PortfolioError> {
        self.lifecycle
            .create_case(product_id, case_id, parameters, assignments, actor)
            .await
    }

    pub async fn change_case(
        &self,
        product_id: &ProductId,
        case_id: &CaseId,
        parameters: CaseParameters,
        assignments: Vec<AccountAssignment>,
        actor: &Actor,
    ) -> Result<Case, PortfolioError> {
        self.lifecycle
            .change_case(product_id, case_id, parameters, assignments, actor)
            .await
    }

    pub async fn transition(
        &self,
        product_id: &ProductId,
        case_id: &CaseId,
        target: CaseState,
        actor: &Actor,
    ) -> Result<Case, PortfolioError> {
        self.lifecycle.transition(product_id, case_id, target, actor).await
    }

    pub async fn apply_action(
        &self,
        product_id: &ProductId,
        case_id: &CaseId,
        action: CaseAction,
        actor: &Actor,
    ) -> Result<Case, PortfolioError> {
        self.lifecycle.apply_action(product_id, case_id, action, actor).await
    }

    pub async fn get_case(
        &self,
        product_id: &ProductId,
        case_id: &CaseId,
    ) -> Result<Case, PortfolioError> {
        self.lifecycle.get_case(product_id, case_id).await
    }

    /// Actions valid for a case in `state`
    pub fn allowed_actions(&self, state: CaseState) -> Vec<CaseAction> {
        state.allowed_actions()
    }

    // Paging

    pub async fn page(
        &self,
        product_id: &ProductId,
        include_closed: bool,
        page_index: u32,
        page_size: u32,
    ) -> Result<CasePage, PortfolioError> {
        self.pager
            .page(product_id, include_closed, page_index, page_size)
            .await
    }

    pub async fn first_page(
        &self,
        product_id: &ProductId,
        include_closed: bool,
    ) -> Result<CasePage, PortfolioError> {
        self.pager.first_page(product_id, include_closed).await
    }
}
