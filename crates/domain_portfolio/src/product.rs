//! Products and the product registry
//!
//! A product is the template cases are created against. The registry is the
//! only component allowed to flip a product's enabled flag, and the only
//! authority on whether a product may currently be used to create cases.
//! New products start disabled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use validator::Validate;

use core_kernel::{Actor, AuditInfo, Clock, CurrencyCode, ProductId, MAX_MINOR_CURRENCY_DIGITS};

use crate::error::PortfolioError;
use crate::events::{self, PortfolioEvent};
use crate::locks::KeyedLocks;
use crate::pattern::{self, Pattern};
use crate::ports::{EventNotifier, ProductRepository};

/// Request for creating a new product
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub identifier: ProductId,
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[validate(length(max = 2048))]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub pattern_package: String,
    pub currency_code: CurrencyCode,
    /// Scale of balances held by the product's cases; the configured default when absent
    #[validate(range(max = 4))]
    pub minor_currency_unit_digits: Option<u32>,
}

/// A case template with its enablement gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    identifier: ProductId,
    name: String,
    description: Option<String>,
    pattern_package: String,
    currency_code: CurrencyCode,
    minor_currency_unit_digits: u32,
    enabled: bool,
    #[serde(flatten)]
    audit: AuditInfo,
}

impl Product {
    /// Builds a disabled product from a validated request
    fn from_request(
        request: CreateProductRequest,
        minor_currency_unit_digits: u32,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            identifier: request.identifier,
            name: request.name,
            description: request.description,
            pattern_package: request.pattern_package,
            currency_code: request.currency_code,
            minor_currency_unit_digits,
            enabled: false,
            audit: AuditInfo::created(actor, now),
        }
    }

    pub fn identifier(&self) -> &ProductId {
        &self.identifier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn pattern_package(&self) -> &str {
        &self.pattern_package
    }

    pub fn currency_code(&self) -> &CurrencyCode {
        &self.currency_code
    }

    /// Decimal scale of the product's balances
    pub fn minor_currency_unit_digits(&self) -> u32 {
        self.minor_currency_unit_digits
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    /// Sets the enabled flag, returning true if it actually changed
    fn set_enabled(&mut self, enabled: bool, actor: &Actor, now: DateTime<Utc>) -> bool {
        if self.enabled == enabled {
            return false;
        }
        self.enabled = enabled;
        self.audit.touch(actor, now);
        true
    }
}

/// Service owning product creation and enablement
pub struct ProductRegistry {
    products: Arc<dyn ProductRepository>,
    notifier: Arc<dyn EventNotifier>,
    clock: Arc<dyn Clock>,
    locks: KeyedLocks<ProductId>,
    default_minor_currency_digits: u32,
}

impl ProductRegistry {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        notifier: Arc<dyn EventNotifier>,
        clock: Arc<dyn Clock>,
        default_minor_currency_digits: u32,
    ) -> Self {
        Self {
            products,
            notifier,
            clock,
            locks: KeyedLocks::new(),
            default_minor_currency_digits,
        }
    }

    /// Creates a product in the disabled state
    ///
    /// # Errors
    ///
    /// - `Validation` for malformed fields or an unknown pattern package
    /// - `Duplicate` if the identifier is already taken
    #[instrument(skip(self, request), fields(product_id = %request.identifier))]
    pub async fn create_product(
        &self,
        request: CreateProductRequest,
        actor: &Actor,
    ) -> Result<Product, PortfolioError> {
        request.validate()?;
        if pattern::find_pattern(&request.pattern_package).is_none() {
            return Err(PortfolioError::validation(format!(
                "unknown pattern package {}",
                request.pattern_package
            )));
        }
        let digits = request
            .minor_currency_unit_digits
            .unwrap_or(self.default_minor_currency_digits);
        if digits > MAX_MINOR_CURRENCY_DIGITS {
            return Err(PortfolioError::validation(format!(
                "minor currency unit digits {} exceeds {}",
                digits, MAX_MINOR_CURRENCY_DIGITS
            )));
        }

        let guard = self.locks.lock(request.identifier.clone()).await;
        match self.products.get_product(&request.identifier).await {
            Ok(_) => return Err(PortfolioError::duplicate("Product", &request.identifier)),
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err.into()),
        }

        let product = Product::from_request(request, digits, actor, self.clock.now());
        self.products.put_product(&product).await?;
        drop(guard);

        info!(product_id = %product.identifier(), actor = %actor, "Product created");
        events::announce(
            self.notifier.as_ref(),
            PortfolioEvent::ProductCreated {
                product_id: product.identifier().clone(),
            },
        )
        .await;
        Ok(product)
    }

    pub async fn get_product(&self, id: &ProductId) -> Result<Product, PortfolioError> {
        Ok(self.products.get_product(id).await?)
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, PortfolioError> {
        Ok(self.products.list_products().await?)
    }

    /// Reads the current enabled flag; never cached
    pub async fn is_enabled(&self, id: &ProductId) -> Result<bool, PortfolioError> {
        Ok(self.get_product(id).await?.is_enabled())
    }

    /// Enables or disables a product
    ///
    /// Idempotent: setting the flag it already has changes nothing and
    /// announces nothing.
    #[instrument(skip(self))]
    pub async fn set_enabled(
        &self,
        id: &ProductId,
        enabled: bool,
        actor: &Actor,
    ) -> Result<Product, PortfolioError> {
        let guard = self.locks.lock(id.clone()).await;
        let mut product = self.products.get_product(id).await?;

        if !product.set_enabled(enabled, actor, self.clock.now()) {
            debug!(product_id = %id, enabled, "Product already in requested state");
            return Ok(product);
        }
        self.products.put_product(&product).await?;
        drop(guard);

        info!(product_id = %id, enabled, actor = %actor, "Product enablement changed");
        events::announce(
            self.notifier.as_ref(),
            PortfolioEvent::ProductEnablementChanged {
                product_id: id.clone(),
                enabled,
            },
        )
        .await;
        Ok(product)
    }

    /// Patterns products may be built on
    pub fn list_patterns(&self) -> Vec<Pattern> {
        pattern::all_patterns()
    }
}
