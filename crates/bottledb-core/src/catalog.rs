//! Persisted catalog document types.
//!
//! The catalog file is a flat JSON dump rebuilt from scratch on every fetch
//! run — there is no merge with prior state and no deduplication beyond
//! whatever the upstream `id` field provides. Serialized field names follow
//! the persisted document format (`yearBottled`, `imageUrl`) rather than
//! Rust conventions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One normalized listing from the marketplace catalog.
///
/// Every field defaults to empty string / `0.0` when absent upstream;
/// normalization never errors on missing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Listing price. Currency is assumed USD by the upstream source.
    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub producer: String,

    #[serde(default, rename = "yearBottled")]
    pub year_bottled: String,

    #[serde(default, rename = "abv")]
    pub abv: String,

    #[serde(default, rename = "imageUrl")]
    pub image_url: String,
}

/// The full persisted catalog document: `{last_updated, total_bottles, bottles}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// UTC timestamp of the fetch run that produced this document.
    pub last_updated: DateTime<Utc>,

    pub total_bottles: usize,

    /// Entries in upstream arrival order.
    pub bottles: Vec<CatalogEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_entry_defaults_all_fields_when_absent() {
        let entry: CatalogEntry = serde_json::from_str("{}").expect("deserialize empty object");
        assert_eq!(entry.id, "");
        assert_eq!(entry.name, "");
        assert!((entry.price - 0.0).abs() < f64::EPSILON);
        assert_eq!(entry.producer, "");
        assert_eq!(entry.year_bottled, "");
        assert_eq!(entry.abv, "");
        assert_eq!(entry.image_url, "");
    }

    #[test]
    fn catalog_entry_serializes_document_field_names() {
        let entry = CatalogEntry {
            id: "b-1".to_string(),
            name: "Test Bottle".to_string(),
            price: 99.5,
            producer: "Test Distillery".to_string(),
            year_bottled: "2015".to_string(),
            abv: "46%".to_string(),
            image_url: "https://cdn.example.com/b-1.jpg".to_string(),
        };
        let json = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(json["yearBottled"], "2015");
        assert_eq!(json["imageUrl"], "https://cdn.example.com/b-1.jpg");
        assert!(json.get("year_bottled").is_none());
    }

    #[test]
    fn catalog_last_updated_serializes_as_iso8601_string() {
        let catalog = Catalog {
            last_updated: Utc::now(),
            total_bottles: 0,
            bottles: vec![],
        };
        let json = serde_json::to_value(&catalog).expect("serialize");
        let stamp = json["last_updated"].as_str().expect("string timestamp");
        assert!(stamp.contains('T'), "expected ISO-8601 timestamp: {stamp}");
    }
}
