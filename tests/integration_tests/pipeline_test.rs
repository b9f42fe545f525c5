//! End-to-end pipeline integration tests
//!
//! Tests the complete workflow:
//! 1. Listing discovery
//! 2. Classification (with brand probe)
//! 3. HTTP fetch (mocked)
//! 4. Extraction
//! 5. SQLite persistence
//! 6. Verification

use std::sync::Arc;

use jobsnitch::crawler::Pipeline;
use jobsnitch::models::{SkipReason, Stage, Variant};
use jobsnitch::storage::{JobStore, MemoryJobStore, SqliteJobStore};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{card, listing_page, test_config, LISTING_PATH, NORMAL_PAGE, PREMIUM_PAGE};

async fn mount_listing(server: &MockServer, cards: &[String]) {
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(cards)))
        .mount(server)
        .await;
}

// ============================================================================
// Complete Pipeline Tests
// ============================================================================

#[tokio::test]
async fn test_run_one_extracts_one_unreachable() {
    // Arrange
    let temp_dir = TempDir::new().unwrap();
    let mock_server = MockServer::start().await;

    mount_listing(
        &mock_server,
        &[
            card("1 ngày trước", "/viec-lam/rust-engineer/1.html?ta_source=JobSearchList"),
            card("1 ngày trước", "/viec-lam/offline/2.html"),
        ],
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/viec-lam/rust-engineer/1.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(NORMAL_PAGE))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/viec-lam/offline/2.html"))
        .respond_with(ResponseTemplate::new(500))
        .expect(6)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let store = Arc::new(SqliteJobStore::new(temp_dir.path().join("jobs.db")).unwrap());
    let pipeline = Pipeline::new(&config, store.clone()).unwrap();

    // Act
    let summary = pipeline.run(1).await.unwrap();

    // Assert
    assert_eq!(summary.discovered, 2);
    assert_eq!(summary.report.total, 2);
    assert_eq!(summary.report.inserted, 1);
    assert_eq!(summary.report.duplicates, 0);
    assert_eq!(summary.report.skipped.len(), 1);

    let skipped = &summary.report.skipped[0];
    assert!(skipped.url.ends_with("/viec-lam/offline/2.html"));
    assert_eq!(skipped.stage, Stage::Fetch);
    assert_eq!(skipped.reason, SkipReason::Unreachable);

    assert!(summary.verification.passed);
    assert_eq!(summary.verification.expected, 1);
    assert_eq!(summary.verification.observed, 1);
    assert_eq!(store.count().unwrap(), 1);
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let mock_server = MockServer::start().await;

    mount_listing(
        &mock_server,
        &[card("1 ngày trước", "/viec-lam/rust-engineer/1.html")],
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/viec-lam/rust-engineer/1.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(NORMAL_PAGE))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let store = Arc::new(MemoryJobStore::new());
    let pipeline = Pipeline::new(&config, store.clone()).unwrap();

    let first = pipeline.run(1).await.unwrap();
    assert_eq!(first.report.inserted, 1);

    let second = pipeline.run(1).await.unwrap();
    assert_eq!(second.report.inserted, 0);
    assert_eq!(second.report.duplicates, 1);
    // Nothing new expected, but the window still holds the first insert
    assert!(second.verification.passed);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_brand_probe_body_is_reused() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/brand/vng/tuyen-dung/data-engineer-j2.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PREMIUM_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let store = Arc::new(MemoryJobStore::new());
    let pipeline = Pipeline::new(&config, store.clone()).unwrap();

    let url = format!(
        "{}/brand/vng/tuyen-dung/data-engineer-j2.html?ta_source=BoxFeatureJob",
        mock_server.uri()
    );
    let report = pipeline.scrape_all(&[url]).await;
    assert_eq!(report.inserted, 1);

    let canonical = format!(
        "{}/brand/vng/tuyen-dung/data-engineer-j2.html",
        mock_server.uri()
    );
    let id = jobsnitch::crawler::derive_id(&canonical, 8);
    let stored = store.get(&id).unwrap().unwrap();
    assert_eq!(stored.variant, Variant::Premium);
    assert_eq!(stored.url, canonical);
    assert!(stored.scraped_at.is_some());
}

#[tokio::test]
async fn test_inspect_does_not_persist() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/viec-lam/rust-engineer/1.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(NORMAL_PAGE))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let store = Arc::new(MemoryJobStore::new());
    let pipeline = Pipeline::new(&config, store.clone()).unwrap();

    let record = pipeline
        .inspect(&format!("{}/viec-lam/rust-engineer/1.html", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(record.title(), Some("Senior Rust Engineer"));
    assert!(record.scraped_at.is_none());
    assert!(store.is_empty());
}

// ============================================================================
// Verification Tests
// ============================================================================

#[tokio::test]
async fn test_verify_against_store() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/viec-lam/rust-engineer/1.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(NORMAL_PAGE))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let pipeline = Pipeline::new(&config, Arc::new(MemoryJobStore::new())).unwrap();

    // Empty store: nothing observed
    assert!(!pipeline.verify(1).unwrap().passed);
    assert!(!pipeline.verify(0).unwrap().passed);

    let url = format!("{}/viec-lam/rust-engineer/1.html", mock_server.uri());
    let report = pipeline.scrape_all(&[url]).await;
    assert_eq!(report.inserted, 1);

    assert!(pipeline.verify(1).unwrap().passed);
    assert!(pipeline.verify(0).unwrap().passed);
    assert!(!pipeline.verify(2).unwrap().passed);
}
