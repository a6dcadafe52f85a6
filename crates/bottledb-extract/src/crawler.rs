//! Headless-browser page fetching.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;

use crate::error::ExtractError;

/// Fetches the rendered HTML of a page.
///
/// The production implementation drives a headless browser; tests substitute
/// a canned-response stub.
#[async_trait]
pub trait PageCrawler: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String, ExtractError>;
}

/// Headless-Chromium crawler. Launches a fresh browser per request so a
/// wedged renderer never poisons later scrapes.
#[derive(Debug, Default)]
pub struct ChromeCrawler;

impl ChromeCrawler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    async fn render(&self, url: &str) -> Result<String, ExtractError> {
        let config = BrowserConfig::builder()
            .window_size(1920, 1080)
            .build()
            .map_err(ExtractError::Crawl)?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ExtractError::Crawl(format!("browser launch failed: {e}")))?;

        // The handler stream must be drained for the CDP connection to make
        // progress.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let result = async {
            let page = browser
                .new_page(url)
                .await
                .map_err(|e| ExtractError::Crawl(format!("navigation failed: {e}")))?;
            page.wait_for_navigation()
                .await
                .map_err(|e| ExtractError::Crawl(format!("page load failed: {e}")))?;
            let content = page
                .content()
                .await
                .map_err(|e| ExtractError::Crawl(format!("content capture failed: {e}")))?;
            if let Err(e) = page.close().await {
                tracing::warn!(error = %e, "failed to close page");
            }
            Ok(content)
        }
        .await;

        if let Err(e) = browser.close().await {
            tracing::warn!(error = %e, "failed to close browser");
        }
        if let Err(e) = browser.wait().await {
            tracing::warn!(error = %e, "browser did not exit cleanly");
        }
        handler_task.abort();

        result
    }
}

#[async_trait]
impl PageCrawler for ChromeCrawler {
    async fn fetch_page(&self, url: &str) -> Result<String, ExtractError> {
        tracing::debug!(url, "crawling page");
        self.render(url).await
    }
}
