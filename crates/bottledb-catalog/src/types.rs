//! Listings search endpoint wire types.
//!
//! ## Observed response shape
//!
//! The endpoint returns a **bare JSON array** of search hits; each hit nests
//! the listing under a `_source` key:
//!
//! ```text
//! [
//!   {
//!     "_source": {
//!       "id": "...",
//!       "name": "Springbank 21 Year Old",
//!       "price": 450,
//!       "attributes": { "Producer": "Springbank", "Year Bottled": 2015, "ABV": "46%" },
//!       "imageUrl": "https://..."
//!     }
//!   }
//! ]
//! ```
//!
//! An empty array is the end-of-data signal — there is no total-count field.
//!
//! Attribute values are not consistently typed upstream (`"Year Bottled"` has
//! been observed as both a string and a bare number), so loosely-typed fields
//! are modeled as [`serde_json::Value`] and coerced during normalization
//! rather than failing the whole page on one odd listing.

use serde::Deserialize;
use serde_json::Value;

/// One element of the listings response array.
#[derive(Debug, Deserialize)]
pub struct RawListing {
    #[serde(rename = "_source", default)]
    pub source: ListingSource,
}

/// The listing payload nested under `_source`. All fields optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListingSource {
    /// Upstream listing identifier. Passed through as-is; no local identity
    /// invariant or deduplication.
    pub id: Value,

    pub name: String,

    /// Price in USD. Observed as a JSON number, but coerced leniently.
    pub price: Value,

    pub attributes: ListingAttributes,

    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// The free-form attribute map; only the keys the catalog keeps are modeled.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListingAttributes {
    #[serde(rename = "Producer")]
    pub producer: Value,

    #[serde(rename = "Year Bottled")]
    pub year_bottled: Value,

    #[serde(rename = "ABV")]
    pub abv: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_listing() {
        let json = r#"{
            "_source": {
                "id": "abc123",
                "name": "Springbank 21 Year Old",
                "price": 450.0,
                "attributes": {"Producer": "Springbank", "Year Bottled": 2015, "ABV": "46%"},
                "imageUrl": "https://cdn.example.com/abc123.jpg"
            }
        }"#;
        let listing: RawListing = serde_json::from_str(json).expect("deserialize");
        assert_eq!(listing.source.name, "Springbank 21 Year Old");
        assert_eq!(listing.source.attributes.year_bottled, 2015);
        assert_eq!(listing.source.image_url, "https://cdn.example.com/abc123.jpg");
    }

    #[test]
    fn deserializes_hit_with_missing_source() {
        let listing: RawListing = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(listing.source.name, "");
        assert!(listing.source.id.is_null());
    }

    #[test]
    fn deserializes_source_with_missing_attributes() {
        let json = r#"{"_source": {"name": "Mystery Bottle"}}"#;
        let listing: RawListing = serde_json::from_str(json).expect("deserialize");
        assert_eq!(listing.source.name, "Mystery Bottle");
        assert!(listing.source.attributes.producer.is_null());
    }
}
