use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use bottledb_extract::{ExtractError, ScrapeResult};

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct ScrapeRequest {
    url: String,
}

/// POST /api/v1/scrape — extract the primary bottle's name and price from a
/// product page.
pub(super) async fn scrape_bottle(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ScrapeRequest>,
) -> Result<Json<ApiResponse<ScrapeResult>>, ApiError> {
    let url = validate_url(&req_id.0, &body.url)?;

    let result = state
        .extractor
        .extract(url.as_str())
        .await
        .map_err(|e| map_extract_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: result,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn validate_url(request_id: &str, raw: &str) -> Result<reqwest::Url, ApiError> {
    let url = reqwest::Url::parse(raw.trim()).map_err(|e| {
        ApiError::new(
            request_id,
            "validation_error",
            format!("invalid url: {e}"),
        )
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::new(
            request_id,
            "validation_error",
            "url must use the http or https scheme",
        ));
    }

    Ok(url)
}

fn map_extract_error(request_id: String, error: &ExtractError) -> ApiError {
    let code = match error {
        ExtractError::MissingApiToken => {
            tracing::error!("scrape rejected: no LLM API token configured");
            "configuration_error"
        }
        ExtractError::Crawl(_) => {
            tracing::warn!(error = %error, "crawl failed");
            "crawl_failed"
        }
        ExtractError::Llm(_) => {
            tracing::warn!(error = %error, "extraction call failed");
            "extraction_failed"
        }
        ExtractError::Parse(_)
        | ExtractError::NoCandidates
        | ExtractError::NoValidCandidate
        | ExtractError::InvalidPrice(_) => {
            tracing::info!(error = %error, "page yielded no usable record");
            "unprocessable"
        }
    };
    ApiError::new(request_id, code, error.to_string())
}
