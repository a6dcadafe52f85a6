//! End-to-end scrape pipeline: crawl, extract, select.

use async_trait::async_trait;

use bottledb_core::AppConfig;

use crate::crawler::{ChromeCrawler, PageCrawler};
use crate::error::ExtractError;
use crate::llm::LlmClient;
use crate::select::{select_candidate, ScrapeResult};

/// Turns a product-page URL into one validated name/price record.
#[async_trait]
pub trait BottleExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<ScrapeResult, ExtractError>;
}

/// Production pipeline wiring a crawler to the extraction model.
///
/// The LLM client is `None` when no API token was configured; the token check
/// is deferred to request time so the server can boot (and serve health
/// checks) without one.
pub struct Extractor {
    crawler: Box<dyn PageCrawler>,
    llm: Option<LlmClient>,
}

impl Extractor {
    /// Builds the default pipeline from application config.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let llm = config.groq_api_token.as_ref().map(|token| {
            LlmClient::new(
                &config.llm_api_base,
                token.clone(),
                config.llm_model.clone(),
                config.llm_max_tokens,
            )
        });
        Self {
            crawler: Box::new(ChromeCrawler::new()),
            llm,
        }
    }

    /// Same wiring with a substitute crawler. Test seam.
    #[must_use]
    pub fn with_crawler(crawler: Box<dyn PageCrawler>, llm: Option<LlmClient>) -> Self {
        Self { crawler, llm }
    }
}

#[async_trait]
impl BottleExtractor for Extractor {
    async fn extract(&self, url: &str) -> Result<ScrapeResult, ExtractError> {
        let Some(llm) = self.llm.as_ref() else {
            return Err(ExtractError::MissingApiToken);
        };

        tracing::info!(url, "starting scrape");
        let page_content = self.crawler.fetch_page(url).await?;
        tracing::debug!(url, content_len = page_content.len(), "page crawled");

        let candidates = llm.extract_candidates(&page_content).await?;
        tracing::debug!(url, count = candidates.len(), "extraction candidates");

        let result = select_candidate(&candidates)?;
        tracing::info!(url, name = %result.name, price = result.price, "scrape complete");
        Ok(result)
    }
}
