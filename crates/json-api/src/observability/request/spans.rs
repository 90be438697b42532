//! HTTP span and metric route labels.

/// Paths served by the router; anything else shares one label.
const KNOWN_ROUTES: &[&str] = &[
    "/api/products",
    "/api/search",
    "/api/seed",
    "/healthcheck",
    "/api-doc/openapi.json",
];

const UNMATCHED_ROUTE: &str = "unmatched";

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) route: String,
    pub(super) span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = route_label(path).to_owned();
    let span_name = format!("{method} {route}");

    RequestSpanName { route, span_name }
}

fn route_label(path: &str) -> &str {
    let trimmed = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };

    if KNOWN_ROUTES.contains(&trimmed) {
        return trimmed;
    }

    if trimmed == "/docs" || trimmed.starts_with("/docs/") {
        return "/docs";
    }

    UNMATCHED_ROUTE
}
