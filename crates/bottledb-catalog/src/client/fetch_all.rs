//! Exhaustive offset-pagination loop with best-effort partial results.

use std::time::Duration;

use bottledb_core::CatalogEntry;

use crate::backoff::retry_rate_limited;
use crate::error::CatalogError;
use crate::normalize::normalize_listing;

use super::ListingsClient;

/// Tuning knobs for one catalog fetch run.
///
/// An explicit structure rather than module-level constants so tests can run
/// with near-zero delays.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Number of listings requested per page (`size` query parameter).
    pub page_size: u32,
    /// Politeness throttle between successful page fetches. Not a
    /// concurrency control — the loop is strictly sequential.
    pub inter_request_delay: Duration,
    /// Rate-limit retries allowed per page before the whole run aborts.
    pub max_retries: u32,
    /// Base for the exponential backoff schedule (`base * 2^n` before the
    /// n-th retry).
    pub backoff_base: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_size: 1000,
            inter_request_delay: Duration::from_millis(500),
            max_retries: 3,
            backoff_base: Duration::from_secs(1),
        }
    }
}

/// Result of a full pagination run: everything accumulated before the run
/// ended, plus the abort reason when it ended early.
///
/// The loop never panics or returns a bare error — failures degrade to
/// "fewer records than expected" and the caller decides whether the partial
/// set is worth persisting.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Normalized entries in upstream arrival order.
    pub entries: Vec<CatalogEntry>,
    /// `None` when the run terminated on an empty page; otherwise the error
    /// that cut it short.
    pub failure: Option<CatalogError>,
}

impl FetchOutcome {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

impl ListingsClient {
    /// Pages through the listings endpoint until it returns an empty page.
    ///
    /// The offset starts at zero and advances by `page_size` after each
    /// successful page. An explicitly empty page is the **sole** termination
    /// signal: a page with fewer than `page_size` items does not end the run,
    /// so one further request is always issued after a short page.
    ///
    /// Each page is retried on 429 per [`FetchConfig::max_retries`] with
    /// doubling delays; exhausting that budget — or any other transport
    /// failure — aborts the entire run, returning whatever was accumulated.
    pub async fn fetch_all(&self, endpoint: &str, config: &FetchConfig) -> FetchOutcome {
        let mut entries: Vec<CatalogEntry> = Vec::new();
        let mut offset: u64 = 0;

        loop {
            let page = retry_rate_limited(config.max_retries, config.backoff_base, || {
                self.fetch_page(endpoint, offset, config.page_size)
            })
            .await;

            let listings = match page {
                Ok(listings) => listings,
                Err(err) => {
                    tracing::error!(
                        offset,
                        fetched = entries.len(),
                        error = %err,
                        "catalog fetch aborted — keeping partial results"
                    );
                    return FetchOutcome {
                        entries,
                        failure: Some(err),
                    };
                }
            };

            if listings.is_empty() {
                tracing::info!(total = entries.len(), "no more listings to fetch");
                return FetchOutcome {
                    entries,
                    failure: None,
                };
            }

            entries.extend(listings.into_iter().map(normalize_listing));
            offset += u64::from(config.page_size);
            tracing::info!(fetched = entries.len(), offset, "fetched listings page");

            if !config.inter_request_delay.is_zero() {
                tokio::time::sleep(config.inter_request_delay).await;
            }
        }
    }
}
