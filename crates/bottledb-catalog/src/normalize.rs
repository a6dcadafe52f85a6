//! Normalization from raw listing hits to [`bottledb_core::CatalogEntry`].
//!
//! Missing or oddly-typed upstream fields default (empty string, `0.0`)
//! rather than error — one malformed listing must never abort a fetch run.

use bottledb_core::CatalogEntry;
use serde_json::Value;

use crate::types::RawListing;

/// Normalizes one raw search hit into a flat [`CatalogEntry`].
#[must_use]
pub fn normalize_listing(listing: RawListing) -> CatalogEntry {
    let source = listing.source;
    CatalogEntry {
        id: string_field(&source.id),
        name: source.name,
        price: price_field(&source.price),
        producer: string_field(&source.attributes.producer),
        year_bottled: string_field(&source.attributes.year_bottled),
        abv: string_field(&source.attributes.abv),
        image_url: source.image_url,
    }
}

/// Coerces a loosely-typed upstream value into a string field.
///
/// Strings pass through, bare numbers are rendered (`2015` → `"2015"`),
/// anything else defaults to empty.
fn string_field(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Coerces a loosely-typed upstream price into `f64`, defaulting to `0.0`.
fn price_field(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
