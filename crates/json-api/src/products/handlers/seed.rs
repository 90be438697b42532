//! Catalog Seed Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{errors::ApiError, extensions::*, observability::record_catalog_seed, state::State};

/// Seed confirmation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SeedResponse {
    /// Human-readable confirmation
    pub message: String,

    /// Number of products inserted
    pub count: u64,
}

/// Catalog Seed Handler
///
/// Replaces the whole catalog with the sample products. Failures include
/// their detail in the response body.
#[endpoint(tags("catalog"), summary = "Seed Catalog")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SeedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let result = state.app.products.reseed_catalog().await;

    record_catalog_seed(result.is_ok());

    let count = result.or_500_with_details("failed to seed catalog")?;

    Ok(Json(SeedResponse {
        message: "Database seeded successfully".to_string(),
        count,
    }))
}
