//! Post-run ingestion check
//!
//! Compares how many records a run reported inserting with how many the store
//! holds inside the recency window. The result is advisory: a failed check is
//! reported but never undoes anything.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::storage::JobStore;

/// Outcome of one verification
#[derive(Debug, Clone, Serialize)]
pub struct Verification {
    pub expected: u64,
    pub observed: u64,
    pub cutoff: DateTime<Utc>,
    pub passed: bool,
}

/// Pass rule for expected vs. observed counts
///
/// With something expected the window must hold at least that many records.
/// With nothing expected the window must still hold something, so an empty
/// run on an empty store fails.
pub fn verify_counts(expected: u64, observed: u64) -> bool {
    if expected > 0 {
        observed >= expected
    } else {
        observed > 0
    }
}

/// Windowed store count check
pub struct Verifier<'a> {
    store: &'a dyn JobStore,
    window: Duration,
}

impl<'a> Verifier<'a> {
    /// Fails when `window_days` is not a representable positive span
    pub fn new(store: &'a dyn JobStore, window_days: i64) -> Result<Self> {
        let window = Duration::try_days(window_days)
            .filter(|window| *window > Duration::zero())
            .ok_or_else(|| Error::config(format!("window_days out of range: {window_days}")))?;
        Ok(Self { store, window })
    }

    /// Verify against the store as of `now`
    pub fn verify_at(&self, expected: u64, now: DateTime<Utc>) -> Result<Verification> {
        let cutoff = now
            .checked_sub_signed(self.window)
            .ok_or_else(|| Error::config("verification window reaches before the earliest date"))?;
        let observed = self.store.count_scraped_since(cutoff)?;
        let passed = verify_counts(expected, observed);

        if passed {
            tracing::info!(expected, observed, cutoff = %cutoff, "Verification passed");
        } else {
            tracing::warn!(expected, observed, cutoff = %cutoff, "Verification failed");
        }

        Ok(Verification {
            expected,
            observed,
            cutoff,
            passed,
        })
    }

    /// Verify against the store as of now
    pub fn verify(&self, expected: u64) -> Result<Verification> {
        self.verify_at(expected, Utc::now())
    }
}
