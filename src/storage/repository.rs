//! Job store abstraction and its implementations
//!
//! Business logic talks to [`JobStore`]; SQLite backs production runs and the
//! in-memory store backs tests and dry runs.
//!
//! # Usage
//!
//! ```rust,ignore
//! use jobsnitch::storage::{JobStore, SqliteJobStore, MemoryJobStore};
//!
//! // Production: use SQLite
//! let store = SqliteJobStore::new("data/jobs.db")?;
//!
//! // Testing: in memory
//! let store = MemoryJobStore::new();
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, RwLock};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{ffi, params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::models::JobRecord;

// ============================================================================
// Core Types
// ============================================================================

/// Result of inserting one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Newly stored
    Inserted,
    /// A record with the same id already exists; nothing written
    Duplicate,
}

/// Document store for job records keyed by derived id
pub trait JobStore: Send + Sync {
    /// Insert a stamped record; an existing id yields `Duplicate`
    fn insert(&self, record: &JobRecord) -> Result<InsertOutcome>;

    /// Number of records whose `_scraped_at` is at or after `cutoff`
    fn count_scraped_since(&self, cutoff: DateTime<Utc>) -> Result<u64>;

    /// Look up a record by id
    fn get(&self, id: &str) -> Result<Option<JobRecord>>;

    /// Total number of stored records
    fn count(&self) -> Result<u64>;
}

/// Whether `err` is the `jobs.id` uniqueness failure, as opposed to any
/// other constraint
fn is_primary_key_conflict(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

/// Fixed-width UTC timestamp so text comparison orders chronologically
fn timestamp_key(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn stamped_at(record: &JobRecord) -> Result<DateTime<Utc>> {
    record
        .scraped_at
        .ok_or_else(|| Error::Storage(format!("record {} has no _scraped_at", record.id)))
}

// ============================================================================
// SQLite Implementation
// ============================================================================

/// SQLite implementation of JobStore
///
/// One `jobs` table; the full record is kept as JSON next to the indexed
/// columns used for lookups and windowed counts.
pub struct SqliteJobStore {
    conn: Mutex<Connection>,
}

impl SqliteJobStore {
    /// Open (or create) a store at `path`
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrency
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.create_schema()?;

        tracing::info!(path = %path.display(), "SQLite job store initialized");
        Ok(store)
    }

    /// Create in-memory store (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.create_schema()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::Storage("SQLite connection lock poisoned".to_string()))
    }

    /// Create database schema
    fn create_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            r#"
                CREATE TABLE IF NOT EXISTS jobs (
                    id TEXT PRIMARY KEY,
                    url TEXT NOT NULL,
                    date TEXT NOT NULL,
                    variant TEXT NOT NULL,
                    scraped_at TEXT NOT NULL,
                    document TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_jobs_scraped_at
                    ON jobs(scraped_at);
                "#,
        )?;

        Ok(())
    }
}

impl JobStore for SqliteJobStore {
    fn insert(&self, record: &JobRecord) -> Result<InsertOutcome> {
        let scraped_at = stamped_at(record)?;
        let document = serde_json::to_string(record)?;

        let conn = self.conn()?;
        let result = conn.execute(
            r#"
                INSERT INTO jobs (id, url, date, variant, scraped_at, document)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            params![
                record.id,
                record.url,
                record.date.to_string(),
                record.variant.as_str(),
                timestamp_key(scraped_at),
                document
            ],
        );

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(e) if is_primary_key_conflict(&e) => Ok(InsertOutcome::Duplicate),
            Err(e) => Err(e.into()),
        }
    }

    fn count_scraped_since(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM jobs WHERE scraped_at >= ?1",
            params![timestamp_key(cutoff)],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    fn get(&self, id: &str) -> Result<Option<JobRecord>> {
        let conn = self.conn()?;
        let document: Option<String> = conn
            .query_row(
                "SELECT document FROM jobs WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;

        document
            .map(|doc| serde_json::from_str(&doc).map_err(Error::from))
            .transpose()
    }

    fn count(&self) -> Result<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM jobs", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

// ============================================================================
// In-memory Implementation
// ============================================================================

/// In-memory implementation of JobStore
///
/// Useful for testing without database dependencies.
#[derive(Default)]
pub struct MemoryJobStore {
    records: RwLock<HashMap<String, JobRecord>>,
}

impl MemoryJobStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of records
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or_default()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> Error {
    Error::Storage("in-memory store lock poisoned".to_string())
}

impl JobStore for MemoryJobStore {
    fn insert(&self, record: &JobRecord) -> Result<InsertOutcome> {
        stamped_at(record)?;
        let mut records = self.records.write().map_err(poisoned)?;
        if records.contains_key(&record.id) {
            return Ok(InsertOutcome::Duplicate);
        }
        records.insert(record.id.clone(), record.clone());
        Ok(InsertOutcome::Inserted)
    }

    fn count_scraped_since(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let records = self.records.read().map_err(poisoned)?;
        let count = records
            .values()
            .filter(|r| r.scraped_at.is_some_and(|at| at >= cutoff))
            .count();
        Ok(count as u64)
    }

    fn get(&self, id: &str) -> Result<Option<JobRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(id).cloned())
    }

    fn count(&self) -> Result<u64> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.len() as u64)
    }
}

// ============================================================================
// Tests
// ============================================================================
