//! Error scenario tests
//!
//! Each scenario drops one URL at a different stage and checks the run keeps
//! going with the remaining URLs.

use std::sync::Arc;

use jobsnitch::crawler::Pipeline;
use jobsnitch::models::{SkipReason, Stage};
use jobsnitch::storage::{JobStore, MemoryJobStore, SqliteJobStore};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{test_config, NORMAL_PAGE};

#[tokio::test]
async fn test_each_failure_is_isolated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/viec-lam/ok/1.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(NORMAL_PAGE))
        .mount(&mock_server)
        .await;

    // Fetched fine, but not a detail page
    Mock::given(method("GET"))
        .and(path("/viec-lam/expired/2.html"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>Tin đã hết hạn</body></html>"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/brand/gone/tuyen-dung/x-j3.html"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let mut config = test_config(&mock_server.uri());
    config.crawler.max_retries = 1;
    let store = Arc::new(MemoryJobStore::new());
    let pipeline = Pipeline::new(&config, store.clone()).unwrap();

    let base = mock_server.uri();
    let urls = vec![
        format!("{base}/cong-ty/fpt/100.html"),
        format!("{base}/viec-lam/expired/2.html"),
        format!("{base}/brand/gone/tuyen-dung/x-j3.html"),
        format!("{base}/viec-lam/ok/1.html"),
    ];
    let report = pipeline.scrape_all(&urls).await;

    assert_eq!(report.total, 4);
    assert_eq!(report.inserted, 1);
    assert_eq!(report.skipped.len(), 3);

    let stages: Vec<(Stage, SkipReason)> = report
        .skipped
        .iter()
        .map(|s| (s.stage, s.reason))
        .collect();
    assert_eq!(
        stages,
        vec![
            (Stage::Classify, SkipReason::Unclassified),
            (Stage::Extract, SkipReason::MissingContent),
            (Stage::Classify, SkipReason::Unreachable),
        ]
    );
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_failing_listing_yields_empty_run() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let pipeline = Pipeline::new(&config, Arc::new(MemoryJobStore::new())).unwrap();

    let summary = pipeline.run(2).await.unwrap();
    assert_eq!(summary.discovered, 0);
    assert_eq!(summary.report.inserted, 0);
    // Nothing inserted and nothing in the window
    assert!(!summary.verification.passed);
}

#[tokio::test]
async fn test_duplicates_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("data").join("jobs.db");
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/viec-lam/ok/1.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(NORMAL_PAGE))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let urls = vec![format!("{}/viec-lam/ok/1.html", mock_server.uri())];

    {
        let store = Arc::new(SqliteJobStore::new(&db_path).unwrap());
        let pipeline = Pipeline::new(&config, store).unwrap();
        assert_eq!(pipeline.scrape_all(&urls).await.inserted, 1);
    }

    let store = Arc::new(SqliteJobStore::new(&db_path).unwrap());
    let pipeline = Pipeline::new(&config, store.clone()).unwrap();
    let report = pipeline.scrape_all(&urls).await;

    assert_eq!(report.inserted, 0);
    assert_eq!(report.duplicates, 1);
    assert_eq!(store.count().unwrap(), 1);
}
