//! Integration tests for products, enablement and patterns

use domain_portfolio::events::{self, EventPayload};
use domain_portfolio::pattern::{designators, INDIVIDUAL_LENDING};
use domain_portfolio::PortfolioConfig;
use test_utils::{
    assert_error_code, ActorFixtures, IdFixtures, TemporalFixtures, TestPortfolio,
    TestProductRequestBuilder,
};

// ============= CREATE TESTS =============
mod create_tests {
    use super::*;

    #[tokio::test]
    async fn test_new_product_starts_disabled() {
        let portfolio = TestPortfolio::new();
        let request = TestProductRequestBuilder::new().build();
        let product_id = request.identifier.clone();

        let product = portfolio
            .service
            .create_product(request, &ActorFixtures::fred())
            .await
            .unwrap();

        assert!(!product.is_enabled());
        assert_eq!(product.pattern_package(), INDIVIDUAL_LENDING);
        assert_eq!(product.audit().created_on(), TemporalFixtures::epoch());
        assert!(!portfolio.service.is_product_enabled(&product_id).await.unwrap());
        assert!(
            portfolio
                .notifier
                .contains(events::POST_PRODUCT, &EventPayload::product(product_id))
                .await
        );
    }

    #[tokio::test]
    async fn test_duplicate_product_rejected() {
        let portfolio = TestPortfolio::new();
        let product_id = IdFixtures::product_id();
        let fred = ActorFixtures::fred();
        portfolio
            .service
            .create_product(TestProductRequestBuilder::new().with_identifier(product_id.clone()).build(), &fred)
            .await
            .unwrap();

        let result = portfolio
            .service
            .create_product(TestProductRequestBuilder::new().with_identifier(product_id).build(), &fred)
            .await;
        assert_error_code(result, "duplicate");
    }

    #[tokio::test]
    async fn test_unknown_pattern_rejected() {
        let portfolio = TestPortfolio::new();
        let request = TestProductRequestBuilder::new()
            .with_pattern_package("group-lending.v9")
            .build();

        let result = portfolio.service.create_product(request, &ActorFixtures::fred()).await;
        assert_error_code(result, "validation");
    }

    #[tokio::test]
    async fn test_field_rules_enforced() {
        let portfolio = TestPortfolio::new();
        let fred = ActorFixtures::fred();

        let empty_name = TestProductRequestBuilder::new().with_name("").build();
        assert_error_code(portfolio.service.create_product(empty_name, &fred).await, "validation");

        let too_precise = TestProductRequestBuilder::new().with_minor_digits(Some(5)).build();
        assert_error_code(portfolio.service.create_product(too_precise, &fred).await, "validation");
    }

    #[tokio::test]
    async fn test_minor_digits_default_from_config() {
        let portfolio = TestPortfolio::with_config(PortfolioConfig {
            default_minor_currency_digits: 3,
            ..PortfolioConfig::default()
        });
        let request = TestProductRequestBuilder::new().with_minor_digits(None).build();

        let product = portfolio
            .service
            .create_product(request, &ActorFixtures::fred())
            .await
            .unwrap();
        assert_eq!(product.minor_currency_unit_digits(), 3);
    }

    #[tokio::test]
    async fn test_products_listed_by_identifier() {
        let portfolio = TestPortfolio::new();
        let fred = ActorFixtures::fred();
        for id in ["zeta", "alpha", "mid"] {
            portfolio
                .service
                .create_product(
                    TestProductRequestBuilder::new()
                        .with_identifier(core_kernel::ProductId::new(id).unwrap())
                        .build(),
                    &fred,
                )
                .await
                .unwrap();
        }

        let ids: Vec<_> = portfolio
            .service
            .list_products()
            .await
            .unwrap()
            .iter()
            .map(|p| p.identifier().to_string())
            .collect();
        assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
    }
}

// ============= ENABLEMENT TESTS =============
mod enablement_tests {
    use super::*;

    #[tokio::test]
    async fn test_enabling_twice_announces_once() {
        let portfolio = TestPortfolio::new();
        let product = portfolio.create_product().await;
        let product_id = product.identifier().clone();
        let fred = ActorFixtures::fred();

        portfolio.service.set_product_enabled(&product_id, true, &fred).await.unwrap();
        portfolio.tick(10);
        let again = portfolio.service.set_product_enabled(&product_id, true, &fred).await.unwrap();

        assert!(again.is_enabled());
        assert_eq!(again.audit().last_modified_on(), TemporalFixtures::epoch());
        let payload = EventPayload::product(product_id);
        assert_eq!(portfolio.notifier.count(events::PUT_PRODUCT_ENABLE, &payload).await, 1);
    }

    #[tokio::test]
    async fn test_disabling_a_disabled_product_is_silent() {
        let portfolio = TestPortfolio::new();
        let product = portfolio.create_product().await;
        let product_id = product.identifier().clone();

        portfolio
            .service
            .set_product_enabled(&product_id, false, &ActorFixtures::fred())
            .await
            .unwrap();

        let payload = EventPayload::product(product_id);
        assert_eq!(portfolio.notifier.count(events::PUT_PRODUCT_ENABLE, &payload).await, 0);
    }

    #[tokio::test]
    async fn test_toggle_of_unknown_product_is_not_found() {
        let portfolio = TestPortfolio::new();
        let result = portfolio
            .service
            .set_product_enabled(&IdFixtures::unique_product_id(), true, &ActorFixtures::fred())
            .await;
        assert_error_code(result, "not_found");
    }
}

// ============= PATTERN TESTS =============
mod pattern_tests {
    use super::*;

    #[test]
    fn test_patterns_listed() {
        let portfolio = TestPortfolio::new();
        let patterns = portfolio.service.list_patterns();

        assert!(!patterns.is_empty());
        let lending = patterns
            .iter()
            .find(|p| p.parameter_package == INDIVIDUAL_LENDING)
            .unwrap();
        assert_eq!(lending.account_designators.len(), designators::ALL.len());
        assert!(lending.uses_designator(designators::PENDING_DISBURSAL));
    }
}
