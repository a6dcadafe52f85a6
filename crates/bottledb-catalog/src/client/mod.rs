//! HTTP client for the marketplace listings search endpoint.

mod fetch_all;

use std::time::Duration;

use reqwest::Client;

use crate::error::CatalogError;
use crate::types::RawListing;

pub use fetch_all::{FetchConfig, FetchOutcome};

/// HTTP client for the paginated listings search endpoint.
///
/// Handles rate limiting (429) and other non-2xx responses as typed errors.
/// Pagination is offset-driven: the caller advances `from` by the page size
/// until the endpoint returns an empty array.
pub struct ListingsClient {
    client: Client,
}

impl ListingsClient {
    /// Creates a `ListingsClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches one page of listings: `GET {endpoint}?from={offset}&size={page_size}&listed=true`.
    ///
    /// A `null` or missing body array deserializes to an empty page, which is
    /// the upstream end-of-data signal.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::RateLimited`] — HTTP 429, with `Retry-After` parsed
    ///   when present (default 60s).
    /// - [`CatalogError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`CatalogError::Http`] — network or TLS failure.
    /// - [`CatalogError::Deserialize`] — response body is not a listings array.
    pub async fn fetch_page(
        &self,
        endpoint: &str,
        offset: u64,
        page_size: u32,
    ) -> Result<Vec<RawListing>, CatalogError> {
        let url = Self::page_url(endpoint, offset, page_size)?;

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(CatalogError::RateLimited { retry_after_secs });
        }

        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let listings = serde_json::from_str::<Option<Vec<RawListing>>>(&body).map_err(|e| {
            CatalogError::Deserialize {
                context: format!("listings page at offset {offset}"),
                source: e,
            }
        })?;

        Ok(listings.unwrap_or_default())
    }

    /// Builds the page URL for the given offset and page size.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidEndpoint`] if `endpoint` is not a valid
    /// URL base.
    fn page_url(endpoint: &str, offset: u64, page_size: u32) -> Result<String, CatalogError> {
        let mut url =
            reqwest::Url::parse(endpoint).map_err(|e| CatalogError::InvalidEndpoint {
                endpoint: endpoint.to_owned(),
                reason: e.to_string(),
            })?;

        url.query_pairs_mut()
            .append_pair("from", &offset.to_string())
            .append_pair("size", &page_size.to_string())
            .append_pair("listed", "true");

        Ok(url.to_string())
    }
}
