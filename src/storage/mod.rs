//! Persistence of job records
//!
//! Records are stored once per derived id. Re-running a crawl over the same
//! postings is harmless: the second insert of an id reports `Duplicate`.

pub mod repository;

pub use repository::{InsertOutcome, JobStore, MemoryJobStore, SqliteJobStore};

use crate::error::Result;
use crate::models::JobRecord;
use crate::utils::error::CrawlerError;

/// Hand a finished record to the store
///
/// # Errors
///
/// Returns `CrawlerError::InvalidRecord` for a record with an empty id or
/// without its `_scraped_at` stamp, otherwise any store error
pub fn persist(store: &dyn JobStore, record: &JobRecord) -> Result<InsertOutcome> {
    if record.id.is_empty() {
        return Err(CrawlerError::InvalidRecord(format!("empty id for {}", record.url)).into());
    }
    if record.scraped_at.is_none() {
        return Err(
            CrawlerError::InvalidRecord(format!("{} was not stamped before persist", record.id))
                .into(),
        );
    }

    store.insert(record)
}
