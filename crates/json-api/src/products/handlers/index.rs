//! Product Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{errors::ApiError, extensions::*, products::models::ProductResponse, state::State};

/// Product Index Handler
///
/// Returns every product in the catalog.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_products()
        .await
        .or_500("failed to fetch products")?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use trizen_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("api/products").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_empty_list() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|| Ok(vec![]));

        products.expect_search_products().never();
        products.expect_reseed_catalog().never();

        let mut res = TestClient::get("http://example.com/api/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<ProductResponse> = res.take_json().await?;

        assert!(body.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_returns_products_in_store_order() -> TestResult {
        let first = make_product("Smartphone Max 20", "Electronics", 29_999);
        let second = make_product("Leather Jacket", "Fashion", 5_999);
        let expected = vec![first.uuid.into_uuid(), second.uuid.into_uuid()];

        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(move || Ok(vec![first, second]));

        products.expect_search_products().never();
        products.expect_reseed_catalog().never();

        let body: Vec<ProductResponse> = TestClient::get("http://example.com/api/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        let ids: Vec<_> = body.iter().map(|product| product.id).collect();

        assert_eq!(ids, expected);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_service_error_returns_generic_500() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|| Err(ProductsServiceError::InvalidData("broken row")));

        products.expect_search_products().never();
        products.expect_reseed_catalog().never();

        let mut res = TestClient::get("http://example.com/api/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        let body: Value = res.take_json().await?;

        assert_eq!(body, json!({ "error": "Server error" }));

        Ok(())
    }
}
