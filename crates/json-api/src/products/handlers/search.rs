//! Product Search Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{errors::ApiError, extensions::*, products::models::ProductResponse, state::State};

/// Product Search Handler
///
/// Returns up to five products whose name contains `q`, ignoring case. A
/// missing or blank `q` returns an empty list.
#[endpoint(tags("products"), summary = "Search Products")]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let Some(query) = q.into_inner().filter(|query| !query.trim().is_empty()) else {
        return Ok(Json(Vec::new()));
    };

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .search_products(&query)
        .await
        .or_500("failed to search products")?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}
