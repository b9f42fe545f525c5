// Core data structures for jobsnitch crawler

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered label → text mapping, kept in page order
pub type Fields = IndexMap<String, String>;

/// Detail-page layout family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Normal,
    Premium,
    Brand,
    Unknown,
}

impl Variant {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Premium => "premium",
            Self::Brand => "brand",
            Self::Unknown => "unknown",
        }
    }

    /// Create from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "premium" => Some(Self::Premium),
            "brand" => Some(Self::Brand),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tags attached to a posting
///
/// `job_tags` are the tags shown directly on the job; `related_tags` groups
/// the category boxes by their heading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobTags {
    pub job_tags: Vec<String>,
    pub related_tags: IndexMap<String, Vec<String>>,
}

/// Canonical job posting, identical in shape for every page variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Short id derived from the canonical URL; the store's primary key
    #[serde(rename = "_id")]
    pub id: String,
    pub url: String,
    /// Scrape date minus one day
    pub date: NaiveDate,
    pub variant: Variant,
    pub company_info: Fields,
    pub job_info: Fields,
    pub general_info: Fields,
    pub job_description: Fields,
    pub tags: JobTags,
    #[serde(rename = "_scraped_at", skip_serializing_if = "Option::is_none", default)]
    pub scraped_at: Option<DateTime<Utc>>,
}

impl JobRecord {
    /// Stamp the persistence timestamp, consuming the record
    #[must_use]
    pub fn stamped(mut self, at: DateTime<Utc>) -> Self {
        self.scraped_at = Some(at);
        self
    }

    /// Job title, when the extractor found one
    pub fn title(&self) -> Option<&str> {
        self.job_info.get("job_title").map(String::as_str)
    }
}

/// Pipeline stage at which a URL was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Classify,
    Fetch,
    Extract,
    Persist,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Classify => "classify",
            Self::Fetch => "fetch",
            Self::Extract => "extract",
            Self::Persist => "persist",
        };
        f.write_str(s)
    }
}

/// Why a URL produced no inserted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Fetch exhausted its retries
    Unreachable,
    /// Page fetched but the expected container is absent
    MissingContent,
    /// URL matches no known variant
    Unclassified,
    /// Store rejected or failed the insert
    Storage,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unreachable => "unreachable",
            Self::MissingContent => "missing_content",
            Self::Unclassified => "unclassified",
            Self::Storage => "storage",
        };
        f.write_str(s)
    }
}

/// A URL that was dropped, with enough context to reconstruct why
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedUrl {
    pub url: String,
    pub stage: Stage,
    pub reason: SkipReason,
    pub detail: String,
}

/// Outcome of the scrape stage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapeReport {
    /// Number of URLs handed to the stage
    pub total: usize,
    /// Records newly written to the store
    pub inserted: usize,
    /// Records whose id was already stored
    pub duplicates: usize,
    pub skipped: Vec<SkippedUrl>,
}

impl ScrapeReport {
    /// Record a dropped URL
    pub fn skip(
        &mut self,
        url: &str,
        stage: Stage,
        reason: SkipReason,
        detail: impl Into<String>,
    ) {
        self.skipped.push(SkippedUrl {
            url: url.to_string(),
            stage,
            reason,
            detail: detail.into(),
        });
    }

    /// Count skips for one reason
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|s| s.reason == reason).count()
    }
}
