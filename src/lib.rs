//! jobsnitch - TopCV IT job-posting crawler
//!
//! Discovers recently posted jobs on the listing pages, recognizes which of the
//! three detail-page layouts each posting uses, extracts one canonical record
//! per posting and stores it under an id derived from its URL.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Discovery, fetching, classification and the pipeline
//! - [`parser`] - Per-layout HTML extraction
//! - [`models`] - Core data structures and types
//! - [`storage`] - Idempotent record persistence (SQLite)
//! - [`notifications`] - Run status messages (Telegram, webhook)
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use jobsnitch::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let store = Arc::new(SqliteJobStore::new(&config.storage.sqlite_path)?);
//!     let pipeline = Pipeline::new(&config, store)?;
//!     let summary = pipeline.run(config.crawler.max_pages).await?;
//!     println!("verification passed: {}", summary.verification.passed);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crawler;
pub mod error;
pub mod models;
pub mod notifications;
pub mod parser;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::crawler::{Fetcher, Pipeline, RunSummary, Verification};
    pub use crate::error::{Error, ErrorCategory, ErrorClass, Result};
    pub use crate::models::{JobRecord, ScrapeReport, SkipReason, Stage, Variant};
    pub use crate::storage::{InsertOutcome, JobStore, MemoryJobStore, SqliteJobStore};
}

// Direct re-exports for convenience
pub use models::{JobRecord, Variant};
