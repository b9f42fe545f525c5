//! Integration tests module
//!
//! End-to-end tests for the jobsnitch pipeline against a mock TopCV server:
//! - Complete discover → scrape → verify runs
//! - Per-URL failure handling
//! - Run status notifications

pub mod error_scenarios;
pub mod notification_test;
pub mod pipeline_test;
