//! Flat-file catalog persistence.
//!
//! The document is rebuilt and fully overwritten on every run — no append,
//! no versioning, no locking.

use std::path::Path;

use bottledb_core::{Catalog, CatalogEntry};
use chrono::Utc;

use crate::error::CatalogError;

/// Wraps `entries` in a [`Catalog`] stamped with the current UTC time and
/// overwrites `path` with the pretty-printed document.
///
/// # Errors
///
/// Returns [`CatalogError::Store`] if the file cannot be written.
pub fn save_catalog(path: &Path, entries: Vec<CatalogEntry>) -> Result<(), CatalogError> {
    let catalog = Catalog {
        last_updated: Utc::now(),
        total_bottles: entries.len(),
        bottles: entries,
    };

    let json = serde_json::to_string_pretty(&catalog).map_err(|e| CatalogError::Deserialize {
        context: "catalog document".to_owned(),
        source: e,
    })?;

    std::fs::write(path, json).map_err(|e| CatalogError::Store {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Reads a previously persisted catalog document back.
///
/// # Errors
///
/// Returns [`CatalogError::Store`] if the file cannot be read, or
/// [`CatalogError::Deserialize`] if it is not a valid catalog document.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let body = std::fs::read_to_string(path).map_err(|e| CatalogError::Store {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_json::from_str(&body).map_err(|e| CatalogError::Deserialize {
        context: path.display().to_string(),
        source: e,
    })
}
