//! Rate-limit retry helper for catalog page fetches.
//!
//! Only [`CatalogError::RateLimited`] is retried. Every other failure —
//! network errors, unexpected statuses, malformed bodies — aborts the fetch
//! immediately so the caller can keep whatever was accumulated so far.

use std::future::Future;
use std::time::Duration;

use crate::error::CatalogError;

/// Delay before the n-th retry (1-based): `base * 2^n`.
///
/// With a 1-second base the schedule is 2s, 4s, 8s — doubling each attempt.
pub(crate) fn backoff_delay(base: Duration, retry: u32) -> Duration {
    base.saturating_mul(1u32 << retry.min(30))
}

/// Executes `operation`, retrying the same page on rate-limit signals.
///
/// After the initial attempt, up to `max_retries` further attempts are made,
/// sleeping [`backoff_delay`] before each. Exhausting the budget returns the
/// final `RateLimited` error; non-rate-limit errors return at once without
/// sleeping.
pub(crate) async fn retry_rate_limited<T, F, Fut>(
    max_retries: u32,
    backoff_base: Duration,
    mut operation: F,
) -> Result<T, CatalogError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CatalogError>>,
{
    let mut retries = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(CatalogError::RateLimited { retry_after_secs }) if retries < max_retries => {
                retries += 1;
                let delay = backoff_delay(backoff_base, retries);
                tracing::warn!(
                    retries,
                    max_retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    retry_after_secs,
                    "rate limited — retrying page after backoff"
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
