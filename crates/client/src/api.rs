//! Catalog API client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

use crate::products::{Product, SeedSummary};

/// Errors raised while talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogApiError {
    /// The configured base URL could not be parsed.
    #[error("invalid catalog API url {url:?}: {reason}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,

        /// Why it was rejected.
        reason: String,
    },

    /// The request never produced a response.
    #[error("catalog API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("catalog API returned {status}: {message}")]
    Status {
        /// Response status.
        status: StatusCode,

        /// The `error` field of the body, plus `details` when present.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("could not decode catalog API response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Read operations and the reseed trigger exposed by the catalog API.
#[automock]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch every product.
    async fn list_products(&self) -> Result<Vec<Product>, CatalogApiError>;

    /// Fetch at most five products whose name contains `query`.
    async fn search_products(&self, query: &str) -> Result<Vec<Product>, CatalogApiError>;

    /// Replace the catalog with the sample products.
    async fn seed_catalog(&self) -> Result<SeedSummary, CatalogApiError>;
}

/// [`CatalogApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    base: Url,
    http: Client,
}

impl HttpCatalogApi {
    /// Create a client rooted at `base_url`, e.g. `http://localhost:5000/api`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogApiError::InvalidUrl`] when `base_url` is not an
    /// absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, CatalogApiError> {
        Ok(Self {
            base: parse_base_url(base_url)?,
            http: Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogApiError> {
        self.base
            .join(path)
            .map_err(|error| CatalogApiError::InvalidUrl {
                url: format!("{}{path}", self.base),
                reason: error.to_string(),
            })
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogApiError> {
        let response = self.http.get(self.endpoint("products")?).send().await?;

        decode(response).await
    }

    async fn search_products(&self, query: &str) -> Result<Vec<Product>, CatalogApiError> {
        debug!(query, "searching catalog");

        let response = self
            .http
            .get(self.endpoint("search")?)
            .query(&[("q", query)])
            .send()
            .await?;

        decode(response).await
    }

    async fn seed_catalog(&self) -> Result<SeedSummary, CatalogApiError> {
        let response = self.http.post(self.endpoint("seed")?).send().await?;

        decode(response).await
    }
}

/// The API's error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,

    #[serde(default)]
    details: Option<String>,
}

impl ErrorBody {
    fn message(self) -> String {
        match self.details {
            Some(details) => format!("{} ({details})", self.error),
            None => self.error,
        }
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, CatalogApiError> {
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();

        return Err(CatalogApiError::Status {
            status,
            message: error_message(&text),
        });
    }

    response.json().await.map_err(CatalogApiError::Decode)
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map_or_else(|_| body.trim().to_string(), ErrorBody::message)
}

/// Relative joins replace the last path segment unless it ends with `/`.
fn parse_base_url(base_url: &str) -> Result<Url, CatalogApiError> {
    let invalid = |reason: String| CatalogApiError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut url = Url::parse(base_url).map_err(|error| invalid(error.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
