//! Integration tests for case paging

use proptest::prelude::*;
use std::collections::BTreeSet;

use core_kernel::ProductId;
use domain_portfolio::{CaseAction, PortfolioConfig};
use test_utils::{
    assert_error_code, ActorFixtures, IdFixtures, ParameterFixtures, TestPortfolio,
};

// ============= TEST FIXTURES =============

async fn portfolio_with_cases(count: usize, config: PortfolioConfig) -> (TestPortfolio, ProductId) {
    let portfolio = TestPortfolio::with_config(config);
    let product_id = portfolio.create_and_enable_product().await;
    for n in 0..count {
        portfolio
            .service
            .create_case(
                &product_id,
                &IdFixtures::numbered_case_id(n),
                ParameterFixtures::case_parameters(),
                vec![],
                &ActorFixtures::fred(),
            )
            .await
            .unwrap();
    }
    (portfolio, product_id)
}

// ============= PAGING TESTS =============
mod paging_tests {
    use super::*;

    #[tokio::test]
    async fn test_twenty_cases_in_two_pages() {
        let (portfolio, product_id) = portfolio_with_cases(20, PortfolioConfig::default()).await;

        let first = portfolio.service.page(&product_id, false, 0, 10).await.unwrap();
        let second = portfolio.service.page(&product_id, false, 1, 10).await.unwrap();

        assert_eq!(first.total_pages, 2);
        assert_eq!(first.total_elements, 20);
        assert_eq!(second.total_pages, 2);
        assert_eq!(second.total_elements, 20);
        assert!(first.has_next());
        assert!(!second.has_next());

        let ids: BTreeSet<_> = first
            .elements
            .iter()
            .chain(second.elements.iter())
            .map(|case| case.identifier().clone())
            .collect();
        assert_eq!(ids.len(), 20);
    }

    #[tokio::test]
    async fn test_pages_are_ordered_by_identifier() {
        let (portfolio, product_id) = portfolio_with_cases(5, PortfolioConfig::default()).await;

        let page = portfolio.service.page(&product_id, false, 0, 10).await.unwrap();
        let ids: Vec<_> = page.elements.iter().map(|c| c.identifier().to_string()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty_with_totals() {
        let (portfolio, product_id) = portfolio_with_cases(3, PortfolioConfig::default()).await;

        let page = portfolio.service.page(&product_id, false, 5, 2).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn test_closed_cases_hidden_unless_requested() {
        let (portfolio, product_id) = portfolio_with_cases(4, PortfolioConfig::default()).await;
        portfolio
            .service
            .apply_action(&product_id, &IdFixtures::numbered_case_id(1), CaseAction::Cancel, &ActorFixtures::fred())
            .await
            .unwrap();

        let open_only = portfolio.service.page(&product_id, false, 0, 10).await.unwrap();
        assert_eq!(open_only.total_elements, 3);
        assert!(open_only.elements.iter().all(|c| !c.is_terminal()));

        let everything = portfolio.service.page(&product_id, true, 0, 10).await.unwrap();
        assert_eq!(everything.total_elements, 4);
    }

    #[tokio::test]
    async fn test_empty_product_has_no_pages() {
        let (portfolio, product_id) = portfolio_with_cases(0, PortfolioConfig::default()).await;

        let page = portfolio.service.first_page(&product_id, true).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page_size, 20);
    }
}

// ============= PAGE SIZE TESTS =============
mod page_size_tests {
    use super::*;

    #[tokio::test]
    async fn test_zero_page_size_rejected() {
        let (portfolio, product_id) = portfolio_with_cases(1, PortfolioConfig::default()).await;
        assert_error_code(portfolio.service.page(&product_id, false, 0, 0).await, "validation");
    }

    #[tokio::test]
    async fn test_oversized_page_clamped() {
        let config = PortfolioConfig {
            default_page_size: 2,
            max_page_size: 5,
            ..PortfolioConfig::default()
        };
        let (portfolio, product_id) = portfolio_with_cases(8, config).await;

        let page = portfolio.service.page(&product_id, false, 0, 1000).await.unwrap();
        assert_eq!(page.page_size, 5);
        assert_eq!(page.elements.len(), 5);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let portfolio = TestPortfolio::new();
        let result = portfolio
            .service
            .page(&IdFixtures::unique_product_id(), false, 0, 10)
            .await;
        assert_error_code(result, "not_found");
    }
}

// ============= PROPERTY TESTS =============
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_pages_cover_every_case_exactly_once(count in 0usize..40, size in 1u32..15) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            runtime.block_on(async {
                let (portfolio, product_id) = portfolio_with_cases(count, PortfolioConfig::default()).await;

                let first = portfolio.service.page(&product_id, false, 0, size).await.unwrap();
                let mut seen = Vec::new();
                for index in 0..first.total_pages {
                    let page = portfolio.service.page(&product_id, false, index, size).await.unwrap();
                    assert!(page.elements.len() <= size as usize);
                    seen.extend(page.elements.into_iter().map(|c| c.identifier().clone()));
                }

                assert_eq!(first.total_elements, count as u64);
                assert_eq!(seen.len(), count);
                let distinct: BTreeSet<_> = seen.into_iter().collect();
                assert_eq!(distinct.len(), count);
            });
        }
    }
}
