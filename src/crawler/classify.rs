//! Detail-page variant classification
//!
//! The URL path decides most cases without touching the network. Brand URLs
//! host two layouts, so they need a probe fetch; the probe body is handed back
//! to the caller and reused as the page to extract.

use scraper::Html;

use crate::crawler::fetcher::Fetcher;
use crate::crawler::url::first_path_segment;
use crate::models::Variant;
use crate::parser::selectors::COMMON;
use crate::utils::error::FetchError;

/// What the URL path alone says about a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// `/viec-lam/...`
    Listing,
    /// `/brand/...`, premium or plain brand
    Brand,
    /// Anything else
    Other,
}

/// Result of classifying one URL
#[derive(Debug, Clone)]
pub struct Classification {
    pub variant: Variant,
    /// Body fetched to tell brand layouts apart, if any
    pub probe_html: Option<String>,
}

/// Classify a URL by its first path segment
pub fn classify_path(url: &str) -> PathKind {
    match first_path_segment(url).as_deref() {
        Some("viec-lam") => PathKind::Listing,
        Some("brand") => PathKind::Brand,
        _ => PathKind::Other,
    }
}

/// Whether a page carries the premium detail container
pub fn is_premium(html: &str) -> bool {
    Html::parse_document(html)
        .select(&COMMON.premium_marker)
        .next()
        .is_some()
}

/// Variant classifier backed by the shared fetcher
pub struct Classifier<'a> {
    fetcher: &'a Fetcher,
}

impl<'a> Classifier<'a> {
    pub fn new(fetcher: &'a Fetcher) -> Self {
        Self { fetcher }
    }

    /// Classify `url`, probing brand pages
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Unreachable` when a brand probe exhausts its retries
    pub async fn classify(&self, url: &str) -> Result<Classification, FetchError> {
        match classify_path(url) {
            PathKind::Listing => Ok(Classification {
                variant: Variant::Normal,
                probe_html: None,
            }),
            PathKind::Brand => {
                let html = self.fetcher.fetch(url).await?;
                let variant = if is_premium(&html) {
                    Variant::Premium
                } else {
                    Variant::Brand
                };
                tracing::debug!(url = %url, variant = %variant, "Brand page probed");
                Ok(Classification {
                    variant,
                    probe_html: Some(html),
                })
            }
            PathKind::Other => Ok(Classification {
                variant: Variant::Unknown,
                probe_html: None,
            }),
        }
    }
}
