//! Sequential scraping pipeline
//!
//! Discovery runs once, then every URL goes through classify, fetch, extract,
//! stamp and persist in turn. A failure at any step drops that URL only; the
//! loop always moves on to the next one after the politeness delay.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐   ┌──────────┐   ┌───────┐   ┌─────────┐   ┌─────────┐
//! │ Discovery │──▶│ Classify │──▶│ Fetch │──▶│ Extract │──▶│ Persist │
//! └───────────┘   └──────────┘   └───────┘   └─────────┘   └─────────┘
//!                      └────────── per URL ──────────────────────┘
//!                                                               │
//!                                                          ┌────────┐
//!                                                          │ Verify │
//!                                                          └────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use jobsnitch::config::Config;
//! use jobsnitch::crawler::pipeline::Pipeline;
//! use jobsnitch::storage::SqliteJobStore;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let store = Arc::new(SqliteJobStore::new(&config.storage.sqlite_path)?);
//! let pipeline = Pipeline::new(&config, store)?;
//!
//! let summary = pipeline.run(config.crawler.max_pages).await?;
//! println!("Inserted {} postings", summary.report.inserted);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;

use crate::config::{Config, CrawlerConfig};
use crate::crawler::classify::Classifier;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::list::ListingCrawler;
use crate::crawler::verify::{Verification, Verifier};
use crate::error::{CrawlerError, Error, ErrorClass, Result};
use crate::models::{JobRecord, ScrapeReport, SkipReason, Stage, Variant};
use crate::parser::{extract_record, ExtractContext};
use crate::storage::{persist, InsertOutcome, JobStore};

/// Result of a full discover, scrape and verify run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// URLs produced by discovery
    pub discovered: usize,
    pub report: ScrapeReport,
    pub verification: Verification,
}

/// Why one URL produced no insert
#[derive(Debug)]
struct Skip {
    stage: Stage,
    reason: SkipReason,
    error: Error,
}

impl Skip {
    fn new(stage: Stage, reason: SkipReason, error: impl Into<Error>) -> Self {
        Self {
            stage,
            reason,
            error: error.into(),
        }
    }
}

/// Scraping pipeline over one fetcher and one store
pub struct Pipeline {
    fetcher: Fetcher,
    store: Arc<dyn JobStore>,
    crawler: CrawlerConfig,
    window_days: i64,
    politeness_delay: Duration,
}

impl Pipeline {
    /// Build a pipeline from configuration
    pub fn new(config: &Config, store: Arc<dyn JobStore>) -> Result<Self> {
        let fetcher = Fetcher::new(&config.crawler)?;
        Ok(Self::with_fetcher(fetcher, store, config))
    }

    /// Build a pipeline around an existing fetcher
    pub fn with_fetcher(fetcher: Fetcher, store: Arc<dyn JobStore>, config: &Config) -> Self {
        Self {
            fetcher,
            store,
            crawler: config.crawler.clone(),
            window_days: config.verification.window_days,
            politeness_delay: config.politeness_delay(),
        }
    }

    /// Override the delay between detail pages
    #[must_use]
    pub fn with_politeness_delay(mut self, delay: Duration) -> Self {
        self.politeness_delay = delay;
        self
    }

    /// Store the pipeline writes to
    pub fn store(&self) -> &dyn JobStore {
        self.store.as_ref()
    }

    /// Discovery stage
    pub async fn discover(&self, max_pages: u32) -> Vec<String> {
        ListingCrawler::new(&self.fetcher, &self.crawler)
            .discover_recent_urls(max_pages)
            .await
    }

    /// Scrape stage over `urls`
    pub async fn scrape_all(&self, urls: &[String]) -> ScrapeReport {
        let mut report = ScrapeReport {
            total: urls.len(),
            ..Default::default()
        };

        tracing::info!(total = urls.len(), "Starting scrape");

        for (index, url) in urls.iter().enumerate() {
            if index > 0 && !self.politeness_delay.is_zero() {
                tokio::time::sleep(self.politeness_delay).await;
            }

            match self.process(url).await {
                Ok((id, InsertOutcome::Inserted)) => {
                    report.inserted += 1;
                    tracing::info!(url = %url, id = %id, "Inserted job");
                }
                Ok((id, InsertOutcome::Duplicate)) => {
                    report.duplicates += 1;
                    tracing::info!(url = %url, id = %id, "Job already stored");
                }
                Err(skip) => {
                    tracing::warn!(
                        url = %url,
                        stage = %skip.stage,
                        reason = %skip.reason,
                        category = %skip.error.category(),
                        recoverable = skip.error.is_recoverable(),
                        error = %skip.error,
                        "Skipping URL"
                    );
                    report.skip(url, skip.stage, skip.reason, skip.error.to_string());
                }
            }
        }

        tracing::info!(
            total = report.total,
            inserted = report.inserted,
            duplicates = report.duplicates,
            skipped = report.skipped.len(),
            "Completed scrape"
        );

        report
    }

    /// Verification stage
    pub fn verify(&self, expected: u64) -> Result<Verification> {
        Verifier::new(self.store.as_ref(), self.window_days)?.verify(expected)
    }

    /// All three stages in order
    pub async fn run(&self, max_pages: u32) -> Result<RunSummary> {
        let urls = self.discover(max_pages).await;
        let report = self.scrape_all(&urls).await;
        let verification = self.verify(report.inserted as u64)?;

        Ok(RunSummary {
            discovered: urls.len(),
            report,
            verification,
        })
    }

    /// Classify, fetch and extract one URL without persisting it
    pub async fn inspect(&self, url: &str) -> Result<JobRecord> {
        self.fetch_record(url).await.map_err(|skip| {
            Error::other(format!(
                "{url}: {} failed ({}): {}",
                skip.stage, skip.reason, skip.error
            ))
        })
    }

    async fn fetch_record(&self, url: &str) -> std::result::Result<JobRecord, Skip> {
        let classification = Classifier::new(&self.fetcher)
            .classify(url)
            .await
            .map_err(|e| Skip::new(Stage::Classify, SkipReason::Unreachable, e))?;

        if classification.variant == Variant::Unknown {
            return Err(Skip::new(
                Stage::Classify,
                SkipReason::Unclassified,
                CrawlerError::Unclassified(url.to_string()),
            ));
        }

        let html = match classification.probe_html {
            Some(html) => html,
            None => self
                .fetcher
                .fetch(url)
                .await
                .map_err(|e| Skip::new(Stage::Fetch, SkipReason::Unreachable, e))?,
        };

        let ctx = ExtractContext::new(url, self.crawler.id_length, Utc::now().date_naive());
        extract_record(classification.variant, &html, &ctx)
            .map_err(|e| Skip::new(Stage::Extract, SkipReason::MissingContent, e))
    }

    async fn process(&self, url: &str) -> std::result::Result<(String, InsertOutcome), Skip> {
        let record = self.fetch_record(url).await?.stamped(Utc::now());

        persist(self.store.as_ref(), &record)
            .map(|outcome| (record.id.clone(), outcome))
            .map_err(|e| Skip::new(Stage::Persist, SkipReason::Storage, e))
    }
}
