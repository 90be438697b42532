//! Liveness probe for the catalog server.

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

const SERVICE_NAME: &str = "trizen-catalog";

/// Liveness report
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests
    pub status: String,

    /// Name of the serving component
    pub service: String,

    /// Crate version of the running binary
    pub version: String,
}

/// Report that the catalog server is up.
///
/// The catalog store is not queried, so this stays green while PostgreSQL is
/// unreachable.
#[endpoint(tags("health"), summary = "Catalog server liveness")]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
