use thiserror::Error;

/// Failure taxonomy for the scrape pipeline.
///
/// Every variant is surfaced synchronously to the caller with its reason
/// string; none of them crash the serving process. Nothing at this layer is
/// retried — a single crawl + extraction attempt per request.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Server-side configuration problem: fatal for the request, not for the
    /// process.
    #[error("server configuration error: missing LLM API token")]
    MissingApiToken,

    #[error("failed to crawl the webpage: {0}")]
    Crawl(String),

    /// Transport or provider-status failure of the extraction call.
    #[error("LLM extraction request failed: {0}")]
    Llm(String),

    /// The extraction step returned something that is not a candidate list.
    #[error("failed to parse extracted data: {0}")]
    Parse(String),

    /// The extraction step returned an empty candidate list.
    #[error("no valid data extracted")]
    NoCandidates,

    /// Every candidate was filtered out (missing/empty name or price).
    #[error("failed to extract valid name and price")]
    NoValidCandidate,

    /// The selected candidate's price is semantically invalid.
    #[error("invalid price: {0}")]
    InvalidPrice(String),
}
