//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::products::{
        data::sample_catalog,
        errors::ProductsServiceError,
        models::Product,
        repository::{PgProductsRepository, ProductsRepository},
    },
};

/// Maximum number of products a search returns.
pub const SEARCH_RESULT_LIMIT: i64 = 5;

const LIKE_ESCAPE: char = '\\';

/// Catalog operations backed by a [`ProductsRepository`].
#[derive(Debug, Clone)]
pub struct PgProductsService<R = PgProductsRepository> {
    repository: R,
}

impl PgProductsService {
    /// Service over the `PostgreSQL` repository for `db`.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self::with_repository(PgProductsRepository::new(db.pool().clone()))
    }
}

impl<R: ProductsRepository> PgProductsService<R> {
    /// Service over any repository, used with mocks in tests.
    #[must_use]
    pub fn with_repository(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ProductsRepository> ProductsService for PgProductsService<R> {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        Ok(self.repository.list_products().await?)
    }

    async fn search_products(&self, query: &str) -> Result<Vec<Product>, ProductsServiceError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let pattern = substring_pattern(query);

        debug!(pattern = %pattern, "searching products by name");

        Ok(self
            .repository
            .search_products(&pattern, SEARCH_RESULT_LIMIT)
            .await?)
    }

    async fn reseed_catalog(&self) -> Result<u64, ProductsServiceError> {
        let catalog = sample_catalog()?;

        // Delete and insert are separate statements; readers can observe an
        // empty catalog in between.
        let deleted = self.repository.delete_all_products().await?;
        let inserted = self.repository.insert_products(&catalog).await?;

        info!(deleted, inserted, "catalog reseeded");

        Ok(inserted)
    }
}

/// Catalog operations exposed to the HTTP layer and CLIs.
#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Case-insensitive substring search over product names.
    ///
    /// A blank query returns no products without touching the store.
    async fn search_products(&self, query: &str) -> Result<Vec<Product>, ProductsServiceError>;

    /// Replaces the whole catalog with the fixed sample set.
    ///
    /// Returns the number of products inserted.
    async fn reseed_catalog(&self) -> Result<u64, ProductsServiceError>;
}

/// Build an `ILIKE` pattern matching `query` anywhere in a name.
///
/// Wildcards in user text are escaped so they match literally.
fn substring_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);

    pattern.push('%');

    for character in query.chars() {
        if matches!(character, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }

        pattern.push(character);
    }

    pattern.push('%');

    pattern
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::products::{
            models::{NewProduct, ProductUuid},
            repository::MockProductsRepository,
        },
        test::TestContext,
    };

    use super::*;

    fn product(name: &str) -> Product {
        Product {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            category: "Electronics".to_string(),
            price: Decimal::from(100),
            rating: Decimal::new(40, 1),
            image: "https://example.com/product.jpg".to_string(),
        }
    }

    fn strict_repository() -> MockProductsRepository {
        let mut repository = MockProductsRepository::new();

        repository.expect_list_products().never();
        repository.expect_search_products().never();
        repository.expect_delete_all_products().never();
        repository.expect_insert_products().never();

        repository
    }

    #[test]
    fn substring_pattern_wraps_query() {
        assert_eq!(substring_pattern("phone"), "%phone%");
    }

    #[test]
    fn substring_pattern_escapes_wildcards() {
        assert_eq!(substring_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn substring_pattern_keeps_whitespace() {
        assert_eq!(substring_pattern(" max "), "% max %");
    }

    #[tokio::test]
    async fn blank_query_short_circuits_without_store_access() -> TestResult {
        let service = PgProductsService::with_repository(strict_repository());

        for query in ["", " ", "\t\n  "] {
            assert!(service.search_products(query).await?.is_empty());
        }

        Ok(())
    }

    #[tokio::test]
    async fn search_passes_escaped_pattern_and_limit() -> TestResult {
        let mut repository = MockProductsRepository::new();

        repository
            .expect_search_products()
            .once()
            .withf(|pattern, limit| pattern == "%Phone%" && *limit == SEARCH_RESULT_LIMIT)
            .return_once(|_, _| Ok(vec![product("Smartphone Max 20")]));

        let service = PgProductsService::with_repository(repository);
        let products = service.search_products("Phone").await?;

        assert_eq!(products.len(), 1, "expected a single match");

        Ok(())
    }

    #[tokio::test]
    async fn search_store_failure_is_reported() {
        let mut repository = MockProductsRepository::new();

        repository
            .expect_search_products()
            .once()
            .return_once(|_, _| Err(sqlx::Error::PoolTimedOut));

        let service = PgProductsService::with_repository(repository);
        let result = service.search_products("lamp").await;

        assert!(
            matches!(result, Err(ProductsServiceError::Sql(_))),
            "expected Sql, got {result:?}"
        );
    }

    #[tokio::test]
    async fn reseed_deletes_before_inserting_sample_catalog() -> TestResult {
        let mut sequence = mockall::Sequence::new();
        let mut repository = MockProductsRepository::new();

        repository
            .expect_delete_all_products()
            .once()
            .in_sequence(&mut sequence)
            .return_once(|| Ok(7));

        repository
            .expect_insert_products()
            .once()
            .in_sequence(&mut sequence)
            .withf(|products: &[NewProduct]| products.len() == 24)
            .returning(|products| Ok(products.len() as u64));

        let service = PgProductsService::with_repository(repository);

        assert_eq!(service.reseed_catalog().await?, 24);

        Ok(())
    }

    #[tokio::test]
    async fn reseed_stops_when_delete_fails() {
        let mut repository = MockProductsRepository::new();

        repository
            .expect_delete_all_products()
            .once()
            .return_once(|| Err(sqlx::Error::PoolClosed));

        repository.expect_insert_products().never();

        let service = PgProductsService::with_repository(repository);
        let result = service.reseed_catalog().await;

        assert!(
            matches!(result, Err(ProductsServiceError::Sql(_))),
            "expected Sql, got {result:?}"
        );
    }

    #[tokio::test]
    async fn reseed_reports_insert_failure_after_delete() {
        let mut repository = MockProductsRepository::new();

        repository
            .expect_delete_all_products()
            .once()
            .return_once(|| Ok(0));

        repository
            .expect_insert_products()
            .once()
            .returning(|_| Err(sqlx::Error::PoolClosed));

        let service = PgProductsService::with_repository(repository);
        let result = service.reseed_catalog().await;

        assert!(
            matches!(result, Err(ProductsServiceError::Sql(_))),
            "expected Sql, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_empty_on_fresh_store() -> TestResult {
        let ctx = TestContext::new().await;

        assert!(ctx.products.list_products().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn reseed_from_empty_store_lists_sample_catalog() -> TestResult {
        let ctx = TestContext::new().await;

        let count = ctx.products.reseed_catalog().await?;
        let products = ctx.products.list_products().await?;

        assert_eq!(count, 24);
        assert_eq!(products.len(), 24, "expected the full sample catalog");

        let jacket = products
            .iter()
            .find(|product| product.name == "Leather Jacket")
            .ok_or("Leather Jacket missing after reseed")?;

        assert_eq!(jacket.category, "Fashion");
        assert_eq!(jacket.price, Decimal::from(5999));
        assert_eq!(jacket.rating, Decimal::new(46, 1));

        Ok(())
    }

    #[tokio::test]
    async fn reseed_is_idempotent() -> TestResult {
        let ctx = TestContext::new().await;

        let first_count = ctx.products.reseed_catalog().await?;
        let first = snapshot(&ctx.products.list_products().await?);

        let second_count = ctx.products.reseed_catalog().await?;
        let second = snapshot(&ctx.products.list_products().await?);

        assert_eq!(first_count, second_count);
        assert_eq!(first, second);

        Ok(())
    }

    #[tokio::test]
    async fn reseed_replaces_existing_products() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products.reseed_catalog().await?;
        ctx.products.reseed_catalog().await?;

        assert_eq!(ctx.products.list_products().await?.len(), 24);

        Ok(())
    }

    #[tokio::test]
    async fn search_phone_after_reseed_returns_smartphone_only() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products.reseed_catalog().await?;

        let names: Vec<String> = ctx
            .products
            .search_products("phone")
            .await?
            .into_iter()
            .map(|product| product.name)
            .collect();

        assert_eq!(names, vec!["Smartphone Max 20".to_string()]);

        Ok(())
    }

    #[tokio::test]
    async fn search_results_contain_query_and_are_capped() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products.reseed_catalog().await?;

        for query in ["a", "SMART", "e", "pro"] {
            let products = ctx.products.search_products(query).await?;

            assert!(products.len() <= 5, "too many results for {query:?}");
            assert!(
                products
                    .iter()
                    .all(|product| product.name.to_lowercase().contains(&query.to_lowercase())),
                "every result should contain {query:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn search_unknown_term_returns_empty() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products.reseed_catalog().await?;

        assert!(ctx.products.search_products("ZZZNOPE").await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products.reseed_catalog().await?;

        assert!(ctx.products.search_products("%").await?.is_empty());
        assert!(ctx.products.search_products("_").await?.is_empty());

        Ok(())
    }

    fn snapshot(products: &[Product]) -> Vec<(String, String, Decimal, Decimal, String)> {
        products
            .iter()
            .map(|product| {
                (
                    product.name.clone(),
                    product.category.clone(),
                    product.price,
                    product.rating,
                    product.image.clone(),
                )
            })
            .collect()
    }
}
