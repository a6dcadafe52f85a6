mod backoff;
pub mod client;
pub mod error;
pub mod normalize;
pub mod store;
pub mod types;

pub use client::{FetchConfig, FetchOutcome, ListingsClient};
pub use error::CatalogError;
pub use normalize::normalize_listing;
pub use store::{load_catalog, save_catalog};
pub use types::{ListingAttributes, ListingSource, RawListing};
