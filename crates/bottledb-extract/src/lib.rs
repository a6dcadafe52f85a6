pub mod candidate;
pub mod crawler;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod select;

pub use candidate::ScrapeCandidate;
pub use crawler::{ChromeCrawler, PageCrawler};
pub use error::ExtractError;
pub use llm::LlmClient;
pub use pipeline::{BottleExtractor, Extractor};
pub use select::{select_candidate, ScrapeResult, PRICE_SANITY_CEILING};
