//! URL canonicalization and record identity
//!
//! Detail-page URLs on the listing carry tracking parameters
//! (`ta_source`, `u_sr_id`, ...). Stripping them gives the canonical URL that
//! both the stored record and its derived id are based on.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use sha2::{Digest, Sha256};
use url::Url;

use crate::utils::error::FetchError;

/// Default length of a derived record id
pub const DEFAULT_ID_LENGTH: usize = 8;

/// Strip everything from the first `?` (or `#`) onward
///
/// # Examples
///
/// ```
/// use jobsnitch::crawler::url::canonical_url;
///
/// let url = "https://www.topcv.vn/viec-lam/dev/1909066.html?ta_source=JobSearchList";
/// assert_eq!(canonical_url(url), "https://www.topcv.vn/viec-lam/dev/1909066.html");
/// ```
#[must_use]
pub fn canonical_url(url: &str) -> String {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    url[..end].to_string()
}

/// Derive the short record id of a canonical URL
///
/// SHA-256 of the UTF-8 bytes, URL-safe base64, truncated to `length`
/// characters with padding removed. Pure: the same URL always maps to the
/// same id, which is what makes re-crawls idempotent.
///
/// # Examples
///
/// ```
/// use jobsnitch::crawler::url::derive_id;
///
/// let a = derive_id("https://www.topcv.vn/viec-lam/dev/1.html", 8);
/// let b = derive_id("https://www.topcv.vn/viec-lam/dev/1.html", 8);
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 8);
/// ```
#[must_use]
pub fn derive_id(canonical: &str, length: usize) -> String {
    let digest = Sha256::digest(canonical.as_bytes());
    let encoded = URL_SAFE.encode(digest);
    encoded
        .chars()
        .take(length)
        .collect::<String>()
        .trim_end_matches('=')
        .to_string()
}

/// First non-empty path segment of a URL, if it parses
///
/// Scheme and host are ignored, so `http://127.0.0.1:8080/viec-lam/...`
/// and `https://www.topcv.vn/viec-lam/...` yield the same segment.
#[must_use]
pub fn first_path_segment(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed
        .path_segments()?
        .find(|s| !s.is_empty())
        .map(String::from);
    segment
}

/// Resolve a card link against the page it was found on
///
/// # Errors
///
/// Returns `FetchError::InvalidUrl` if either URL cannot be parsed
pub fn resolve_href(base: &str, href: &str) -> Result<String, FetchError> {
    let base = Url::parse(base).map_err(|e| FetchError::InvalidUrl(format!("{base}: {e}")))?;
    base.join(href.trim())
        .map(|u| u.to_string())
        .map_err(|e| FetchError::InvalidUrl(format!("{href}: {e}")))
}
