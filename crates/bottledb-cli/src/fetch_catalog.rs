//! `fetch-catalog` subcommand: pull every listed bottle and snapshot it.

use std::path::PathBuf;
use std::time::Duration;

use bottledb_catalog::{save_catalog, FetchConfig, ListingsClient};
use bottledb_core::AppConfig;

/// Runs a full catalog fetch and writes the snapshot file.
///
/// A run that aborts mid-pagination still persists whatever it fetched; the
/// snapshot is only skipped when the run produced nothing at all, so a stale
/// snapshot is never replaced by an empty one.
pub async fn run(config: &AppConfig, output: Option<PathBuf>) -> anyhow::Result<()> {
    let output = output.unwrap_or_else(|| config.catalog_output_path.clone());

    let client = ListingsClient::new(config.catalog_request_timeout_secs, &config.user_agent)?;
    let fetch_config = FetchConfig {
        page_size: config.catalog_page_size,
        inter_request_delay: Duration::from_millis(config.catalog_inter_request_delay_ms),
        max_retries: config.catalog_max_retries,
        backoff_base: Duration::from_secs(config.catalog_backoff_base_secs),
    };

    tracing::info!(endpoint = %config.catalog_endpoint, "fetching catalog");
    let outcome = client
        .fetch_all(&config.catalog_endpoint, &fetch_config)
        .await;

    if let Some(failure) = &outcome.failure {
        tracing::warn!(
            fetched = outcome.entries.len(),
            error = %failure,
            "catalog fetch ended early; saving partial results"
        );
    }

    if outcome.entries.is_empty() {
        tracing::warn!("no bottles fetched; catalog not updated");
        return Ok(());
    }

    let total = outcome.entries.len();
    save_catalog(&output, outcome.entries)?;
    tracing::info!(total, path = %output.display(), "catalog saved");

    Ok(())
}
