//! Cross-origin access for browser storefronts.

use std::time::Duration;

use salvo::{
    cors::{self, Cors, CorsHandler},
    http::Method,
};

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(60 * 60);

/// Any origin may call the catalog; only the verbs the API serves are allowed.
pub(crate) fn handler() -> CorsHandler {
    Cors::new()
        .allow_origin(cors::Any)
        .allow_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(cors::Any)
        .max_age(PREFLIGHT_MAX_AGE)
        .into_handler()
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::{
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
            ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
        },
        prelude::*,
        test::TestClient,
    };

    use crate::{router, test_helpers::strict_products_mock};

    fn service() -> Service {
        router::service(
            crate::test_helpers::products_router(strict_products_mock(), router::app_router()),
        )
    }

    #[tokio::test]
    async fn preflight_allows_any_origin_to_post_seed() {
        let res = TestClient::options("http://example.com/api/seed")
            .add_header(ORIGIN, "http://storefront.example", true)
            .add_header(ACCESS_CONTROL_REQUEST_METHOD, "POST", true)
            .send(&service())
            .await;

        let allow_origin = res
            .headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok());

        let allow_methods = res
            .headers()
            .get(ACCESS_CONTROL_ALLOW_METHODS)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        assert_eq!(allow_origin, Some("*"));
        assert!(allow_methods.contains("POST"), "got {allow_methods:?}");
    }

    #[tokio::test]
    async fn simple_request_carries_allow_origin() {
        let res = TestClient::get("http://example.com/healthcheck")
            .add_header(ORIGIN, "http://storefront.example", true)
            .send(&service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(
            res.headers().contains_key(ACCESS_CONTROL_ALLOW_ORIGIN),
            "expected CORS header on simple request"
        );
    }
}
