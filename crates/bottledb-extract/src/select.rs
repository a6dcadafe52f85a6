//! Candidate selection: reduce the extraction output to one validated record.

use serde::Serialize;

use crate::candidate::{parse_price, ScrapeCandidate};
use crate::error::ExtractError;

/// Upper bound on plausible USD prices. Anything above this is treated as a
/// currency-misidentification signal and rejected outright.
pub const PRICE_SANITY_CEILING: f64 = 10_000.0;

/// A validated name/price pair for the primary bottle on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapeResult {
    pub name: String,
    pub price: f64,
}

/// Selects exactly one candidate as authoritative, or decides that none
/// qualify.
///
/// Filtering runs per candidate, independently, in sequence order: a block is
/// skipped when either field is absent, the trimmed name is empty, or the
/// price does not parse as a non-negative number. Among survivors the one
/// with the longest trimmed name wins — a heuristic proxy for "most specific
/// product description" — and the strict `>` comparison resolves ties by
/// first occurrence. That exact behavior is load-bearing for parity with the
/// service's historical output; do not "improve" the ranking.
///
/// The winner is then re-validated on its own: non-empty name, parseable
/// non-negative price, and price at or under [`PRICE_SANITY_CEILING`]. A
/// ceiling breach is an error, never a fallback to a different candidate.
///
/// # Errors
///
/// - [`ExtractError::NoCandidates`] — the input sequence is empty.
/// - [`ExtractError::NoValidCandidate`] — every block was filtered out.
/// - [`ExtractError::InvalidPrice`] — the winner's price fails re-validation.
pub fn select_candidate(candidates: &[ScrapeCandidate]) -> Result<ScrapeResult, ExtractError> {
    if candidates.is_empty() {
        return Err(ExtractError::NoCandidates);
    }

    let mut selected: Option<&ScrapeCandidate> = None;
    let mut max_name_len = 0usize;

    for candidate in candidates {
        let Some(name) = candidate.name.as_deref() else {
            tracing::debug!("skipping block missing name field");
            continue;
        };
        let Some(price) = candidate.price.as_ref() else {
            tracing::debug!("skipping block missing price field");
            continue;
        };

        let name = name.trim();
        if name.is_empty() {
            tracing::debug!("skipping block with empty name");
            continue;
        }
        if parse_price(price).is_none() {
            tracing::debug!(?price, "skipping block with invalid price");
            continue;
        }

        let name_len = name.chars().count();
        if name_len > max_name_len {
            max_name_len = name_len;
            selected = Some(candidate);
        }
    }

    let Some(winner) = selected else {
        return Err(ExtractError::NoValidCandidate);
    };

    // Re-validate the winner only.
    let name = winner.name.as_deref().unwrap_or_default().trim().to_owned();
    if name.is_empty() {
        return Err(ExtractError::NoValidCandidate);
    }

    let price = winner
        .price
        .as_ref()
        .and_then(parse_price)
        .ok_or_else(|| ExtractError::InvalidPrice("not a non-negative number".to_owned()))?;

    if price > PRICE_SANITY_CEILING {
        return Err(ExtractError::InvalidPrice(format!(
            "{price} exceeds the {PRICE_SANITY_CEILING} USD sanity ceiling"
        )));
    }

    Ok(ScrapeResult { name, price })
}
