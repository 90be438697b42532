//! App Router

use salvo::{Router, Service};

use crate::{cors, healthcheck, observability, products};

/// Catalog routes under `/api` plus operational endpoints.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(
            Router::with_path("api")
                .push(Router::with_path("products").get(products::index::handler))
                .push(Router::with_path("search").get(products::search::handler))
                .push(Router::with_path("seed").post(products::seed::handler)),
        )
}

/// Wrap a router with the CORS policy.
///
/// CORS sits on the service rather than the router so preflight requests are
/// answered even for paths with no `OPTIONS` handler.
pub(crate) fn service(router: Router) -> Service {
    Service::new(router).hoop(cors::handler())
}
