//! Listing page discovery with recency filtering
//!
//! Scans the newest-first IT listing page by page and keeps the detail URLs
//! of cards whose update label matches the configured recency label.

use indexmap::IndexMap;
use scraper::Html;

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::url::{canonical_url, resolve_href};
use crate::parser::html::own_text;
use crate::parser::selectors::LISTING;

/// Listing crawler with pagination support
pub struct ListingCrawler<'a> {
    fetcher: &'a Fetcher,
    base_url: String,
    sort_new: bool,
    recency_label: String,
}

impl<'a> ListingCrawler<'a> {
    /// Create a listing crawler sharing `fetcher`
    #[must_use]
    pub fn new(fetcher: &'a Fetcher, config: &CrawlerConfig) -> Self {
        Self {
            fetcher,
            base_url: config.listing_base_url.clone(),
            sort_new: config.sort_new,
            recency_label: config.recency_label.clone(),
        }
    }

    /// Collect recent detail URLs from pages `1..=max_pages`
    ///
    /// A page that fails to load contributes nothing and the scan moves on.
    /// URLs are deduplicated on their canonical form, keeping the first
    /// occurrence and page order.
    pub async fn discover_recent_urls(&self, max_pages: u32) -> Vec<String> {
        let mut found: IndexMap<String, String> = IndexMap::new();

        for page in 1..=max_pages {
            let page_url = ListUrlBuilder::page(&self.base_url, self.sort_new, page);
            tracing::debug!(url = %page_url, page, "Fetching listing page");

            let html = match self.fetcher.fetch_once(&page_url).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!(url = %page_url, page, error = %e, "Listing page failed, skipping");
                    continue;
                }
            };

            let urls = extract_recent_urls(&html, &page_url, &self.recency_label);
            let matched = urls.len();
            for url in urls {
                found.entry(canonical_url(&url)).or_insert(url);
            }

            tracing::debug!(page, matched, total = found.len(), "Processed listing page");
        }

        tracing::info!(
            pages = max_pages,
            total_urls = found.len(),
            "Completed URL discovery"
        );

        found.into_values().collect()
    }
}

/// Detail URLs of cards on one listing page carrying `recency_label`
///
/// The label text is compared exactly, after trimming, ignoring text inside a
/// nested `span`. Relative links are resolved against `page_url`.
pub fn extract_recent_urls(html: &str, page_url: &str, recency_label: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut urls = Vec::new();

    for card in document.select(&LISTING.card) {
        let Some(label) = card.select(&LISTING.label).next() else {
            continue;
        };
        if own_text(label).as_deref() != Some(recency_label) {
            continue;
        }

        let Some(href) = card
            .select(&LISTING.link)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };

        match resolve_href(page_url, href) {
            Ok(url) => urls.push(url),
            Err(e) => tracing::debug!(href, error = %e, "Skipping unresolvable card link"),
        }
    }

    urls
}

/// URL builder for listing pages
pub struct ListUrlBuilder;

impl ListUrlBuilder {
    /// Build a listing page URL
    ///
    /// # Examples
    ///
    /// ```
    /// use jobsnitch::crawler::list::ListUrlBuilder;
    ///
    /// let url = ListUrlBuilder::page("https://www.topcv.vn/tim-viec-lam-cong-nghe-thong-tin-cr257", true, 2);
    /// assert!(url.contains("sort=new"));
    /// assert!(url.contains("page=2"));
    /// ```
    #[must_use]
    pub fn page(base_url: &str, sort_new: bool, page: u32) -> String {
        let sort = if sort_new { "sort=new&" } else { "" };
        format!("{base_url}?{sort}type_keyword=1&page={page}&category_family=r257")
    }
}
