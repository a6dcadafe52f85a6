//! Raw extraction candidates and price parsing.

use serde::Deserialize;
use serde_json::Value;

/// One raw name/price block returned by the extraction step for a page,
/// before validation.
///
/// Both fields are optional and the price type is unconstrained — the model
/// may emit a number, a string, or garbage — so validation happens in the
/// selection pass, not at deserialization time.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeCandidate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Value>,
}

/// Parses a candidate price value as a non-negative number.
///
/// Numbers pass through; strings are trimmed and parsed as `f64`. Empty
/// strings, non-numeric strings, other JSON types, and negative values all
/// yield `None`.
#[must_use]
pub fn parse_price(value: &Value) -> Option<f64> {
    let price = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };

    (price >= 0.0).then_some(price)
}
