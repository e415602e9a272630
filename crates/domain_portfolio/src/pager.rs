//! Case paging
//!
//! Read-only view over a product's cases. Pages are zero-indexed and ordered
//! by case identifier so that consecutive pages never overlap or skip.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use core_kernel::ProductId;

use crate::aggregate::Case;
use crate::error::PortfolioError;
use crate::ports::CaseRepository;
use crate::product::ProductRegistry;

/// One page of cases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasePage {
    pub elements: Vec<Case>,
    /// Size of the filtered set across all pages
    pub total_elements: u64,
    pub total_pages: u32,
    pub page_index: u32,
    /// Effective page size after clamping
    pub page_size: u32,
}

impl CasePage {
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns true if a page follows this one
    pub fn has_next(&self) -> bool {
        self.page_index.saturating_add(1) < self.total_pages
    }
}

pub struct CasePager {
    products: Arc<ProductRegistry>,
    cases: Arc<dyn CaseRepository>,
    default_page_size: u32,
    max_page_size: u32,
}

impl CasePager {
    pub fn new(
        products: Arc<ProductRegistry>,
        cases: Arc<dyn CaseRepository>,
        default_page_size: u32,
        max_page_size: u32,
    ) -> Self {
        Self {
            products,
            cases,
            default_page_size,
            max_page_size,
        }
    }

    /// Returns page `page_index` of the product's cases
    ///
    /// Closed and cancelled cases are skipped unless `include_closed` is set.
    /// A page past the end is empty but still carries the totals.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the product is unknown
    /// - `Validation` if `page_size` is zero
    pub async fn page(
        &self,
        product_id: &ProductId,
        include_closed: bool,
        page_index: u32,
        page_size: u32,
    ) -> Result<CasePage, PortfolioError> {
        if page_size == 0 {
            return Err(PortfolioError::validation("page size must be at least 1"));
        }
        let page_size = page_size.min(self.max_page_size);
        self.products.get_product(product_id).await?;

        let mut cases: Vec<Case> = self
            .cases
            .list_cases(product_id)
            .await?
            .into_iter()
            .filter(|case| include_closed || !case.is_terminal())
            .collect();
        cases.sort_by(|a, b| a.identifier().cmp(b.identifier()));

        let total_elements = cases.len() as u64;
        let total_pages = total_elements.div_ceil(u64::from(page_size)) as u32;
        let elements = cases
            .into_iter()
            .skip((page_index as usize).saturating_mul(page_size as usize))
            .take(page_size as usize)
            .collect();

        debug!(
            product_id = %product_id,
            page_index,
            page_size,
            total_elements,
            "Paged cases"
        );
        Ok(CasePage {
            elements,
            total_elements,
            total_pages,
            page_index,
            page_size,
        })
    }

    /// First page at the configured default size
    pub async fn first_page(
        &self,
        product_id: &ProductId,
        include_closed: bool,
    ) -> Result<CasePage, PortfolioError> {
        self.page(product_id, include_closed, 0, self.default_page_size)
            .await
    }
}
