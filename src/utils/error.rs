//! Error types for the jobsnitch crawler
//!
//! This module defines the domain error types used by the fetcher, the
//! extractors and the per-URL pipeline.

use thiserror::Error;

/// Errors that can occur during HTTP fetching operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status code
    #[error("Unexpected status: {0}")]
    Status(u16),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Every attempt failed; the URL is skipped
    #[error("Unreachable after {attempts} attempts: {url}")]
    Unreachable { url: String, attempts: u32 },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors that can occur while extracting a job record from a detail page
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Root detail container absent from the page
    #[error("{variant} detail container not found")]
    MissingContent { variant: &'static str },

    /// A required sub-section is absent
    #[error("Required element not found: {0}")]
    MissingField(&'static str),

    /// `extract` called before a successful `load`
    #[error("Page not loaded")]
    NotLoaded,
}

/// Per-URL crawler errors outside fetching and extraction
#[derive(Error, Debug)]
pub enum CrawlerError {
    /// URL matches no known page layout
    #[error("Unclassified URL: {0}")]
    Unclassified(String),

    /// Record rejected before persistence
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}
