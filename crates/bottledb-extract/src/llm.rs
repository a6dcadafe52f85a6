//! OpenAI-compatible chat-completions client for field extraction.

use serde::{Deserialize, Serialize};

use crate::candidate::ScrapeCandidate;
use crate::error::ExtractError;

/// Extraction instruction sent as the system message.
const EXTRACTION_INSTRUCTION: &str = "Analyze the alcohol product page and extract the name and \
price of the primary bottle. Focus on the main product, ignoring related products or \
recommendations. If the price is in USD, return it as a number. If the price is in another \
currency (e.g., EUR, GBP, CAD, AUD), convert it to USD using approximate exchange rates: \
1 EUR = 1.10 USD, 1 GBP = 1.25 USD, 1 CAD = 0.75 USD, 1 AUD = 0.65 USD. If the currency is \
unclear, assume USD. Return a JSON array of objects, each with 'name' (string, full product \
name) and 'price' (number, in USD). Ensure only one bottle's data is returned. Example: \
[{\"name\": \"Johnnie Walker Black Label Scotch Whisky 750ml\", \"price\": 25.87}]";

/// Page content is truncated to this many characters before prompting, to
/// stay inside the provider's context window.
const MAX_CONTENT_CHARS: usize = 24_000;

/// Chat-completions HTTP client.
pub struct LlmClient {
    client: reqwest::Client,
    url: String,
    api_token: String,
    model: String,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl LlmClient {
    /// Creates a client for `{api_base}/chat/completions`.
    #[must_use]
    pub fn new(api_base: &str, api_token: String, model: String, max_tokens: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!("{}/chat/completions", api_base.trim_end_matches('/')),
            api_token,
            model,
            max_tokens,
        }
    }

    /// Sends `page_content` through the extraction prompt and parses the
    /// completion into raw candidate blocks.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::Llm`] — transport failure, non-2xx provider status,
    ///   or an undecodable completion envelope.
    /// - [`ExtractError::Parse`] — the completion text is not a JSON
    ///   candidate list.
    pub async fn extract_candidates(
        &self,
        page_content: &str,
    ) -> Result<Vec<ScrapeCandidate>, ExtractError> {
        let content = truncate_chars(page_content, MAX_CONTENT_CHARS);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: EXTRACTION_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content,
                },
            ],
            temperature: 0.0,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractError::Llm(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Llm(format!(
                "provider returned status {status}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ExtractError::Llm(format!("response decode failed: {e}")))?;

        let completion = parsed
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| ExtractError::Parse("completion has no choices".to_owned()))?;

        parse_extraction_payload(completion)
    }
}

/// Parses the completion text into candidate blocks.
///
/// Accepts a JSON array of objects or a bare object (treated as a
/// one-element array). A fenced ```` ```json ```` block is unwrapped first,
/// since chat models routinely add one despite instructions.
pub fn parse_extraction_payload(content: &str) -> Result<Vec<ScrapeCandidate>, ExtractError> {
    let text = strip_code_fence(content.trim());

    if let Ok(candidates) = serde_json::from_str::<Vec<ScrapeCandidate>>(text) {
        return Ok(candidates);
    }
    if let Ok(single) = serde_json::from_str::<ScrapeCandidate>(text) {
        return Ok(vec![single]);
    }

    Err(ExtractError::Parse(format!(
        "extraction output is not a JSON candidate list: {}",
        truncate_chars(text, 200)
    )))
}

/// Unwraps a leading/trailing markdown code fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_start_matches(['\r', '\n']);
    rest.rsplit_once("```").map_or(rest, |(body, _)| body).trim()
}

/// Truncates at a character boundary without allocating.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
