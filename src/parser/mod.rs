//! HTML parsing and job record extraction
//!
//! Each TopCV detail layout has its own extractor. All of them produce the same
//! [`JobRecord`] shape so downstream storage never needs to know the variant.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use jobsnitch::models::Variant;
//! use jobsnitch::parser::{extract_record, ExtractContext};
//!
//! let ctx = ExtractContext::new(
//!     "https://www.topcv.vn/viec-lam/dev/1.html?ta_source=x",
//!     8,
//!     NaiveDate::from_ymd_opt(2024, 10, 28).unwrap(),
//! );
//! // Page without the detail container: no record
//! assert!(extract_record(Variant::Normal, "<html></html>", &ctx).is_err());
//! ```

pub mod brand;
pub mod html;
pub mod normal;
pub mod premium;
pub mod selectors;

pub use brand::BrandExtractor;
pub use normal::NormalExtractor;
pub use premium::PremiumExtractor;

use chrono::{Days, NaiveDate};

use crate::crawler::url::{canonical_url, derive_id};
use crate::models::{Fields, JobRecord, JobTags, Variant};
use crate::utils::error::ExtractError;

/// Per-URL inputs that every extractor needs besides the page itself
#[derive(Debug, Clone)]
pub struct ExtractContext {
    /// Canonical URL of the page
    pub url: String,

    /// Length of the derived id
    pub id_length: usize,

    /// Calendar day the page was scraped
    pub scraped_on: NaiveDate,
}

impl ExtractContext {
    /// Build a context, canonicalizing `url`
    pub fn new(url: &str, id_length: usize, scraped_on: NaiveDate) -> Self {
        Self {
            url: canonical_url(url),
            id_length,
            scraped_on,
        }
    }

    /// Date stored on the record: the day before the scrape
    pub fn record_date(&self) -> NaiveDate {
        self.scraped_on
            .checked_sub_days(Days::new(1))
            .unwrap_or(self.scraped_on)
    }

    /// Empty record carrying identity, URL and date
    pub(crate) fn blank_record(&self, variant: Variant) -> JobRecord {
        JobRecord {
            id: derive_id(&self.url, self.id_length),
            url: self.url.clone(),
            date: self.record_date(),
            variant,
            company_info: Fields::new(),
            job_info: Fields::new(),
            general_info: Fields::new(),
            job_description: Fields::new(),
            tags: JobTags::default(),
            scraped_at: None,
        }
    }
}

/// Structural extractor for one detail-page layout
///
/// `load` parses the page and reports whether the layout's root container is
/// present. `extract` then builds a complete record or fails; it never
/// returns a partial one.
pub trait JobExtractor {
    /// Layout handled by this extractor
    fn variant(&self) -> Variant;

    /// Parse `html`; `false` when the root container is absent
    fn load(&mut self, html: &str) -> bool;

    /// Build the record from the loaded page
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::NotLoaded` before a successful `load`, and
    /// `ExtractError::MissingField` when a required block is absent
    fn extract(&self, ctx: &ExtractContext) -> Result<JobRecord, ExtractError>;
}

/// Extractor matching a classified variant
pub fn extractor_for(variant: Variant) -> Option<Box<dyn JobExtractor>> {
    match variant {
        Variant::Normal => Some(Box::new(NormalExtractor::new())),
        Variant::Premium => Some(Box::new(PremiumExtractor::new())),
        Variant::Brand => Some(Box::new(BrandExtractor::new())),
        Variant::Unknown => None,
    }
}

/// Load and extract in one step
///
/// Parsed documents are not `Send`, so callers in async code use this to
/// keep the whole parse on one side of an await point.
///
/// # Errors
///
/// Returns `ExtractError::MissingContent` when the root container is absent
/// (or the variant has no extractor), otherwise whatever `extract` returns
pub fn extract_record(
    variant: Variant,
    html: &str,
    ctx: &ExtractContext,
) -> Result<JobRecord, ExtractError> {
    let mut extractor = extractor_for(variant).ok_or(ExtractError::MissingContent {
        variant: variant.as_str(),
    })?;

    if !extractor.load(html) {
        return Err(ExtractError::MissingContent {
            variant: variant.as_str(),
        });
    }

    extractor.extract(ctx)
}
