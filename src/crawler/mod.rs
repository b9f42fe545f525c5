//! Crawling: discovery, fetching, classification and the scraping pipeline
//!
//! Every HTTP request goes through one [`fetcher::Fetcher`], whose rate
//! limiter is the single global gate on request frequency.

pub mod classify;
pub mod fetcher;
pub mod headers;
pub mod list;
pub mod pipeline;
pub mod url;
pub mod verify;

pub use classify::{classify_path, is_premium, Classification, Classifier, PathKind};
pub use fetcher::Fetcher;
pub use list::{extract_recent_urls, ListUrlBuilder, ListingCrawler};
pub use pipeline::{Pipeline, RunSummary};
pub use url::{canonical_url, derive_id};
pub use verify::{verify_counts, Verification, Verifier};
