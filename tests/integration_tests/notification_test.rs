//! Notification delivery tests against mock chat endpoints

use std::time::Duration;

use jobsnitch::config::NotificationConfig;
use jobsnitch::notifications::{
    announce, from_config, start_message, Notifier, TelegramNotifier, WebhookNotifier,
};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_telegram_send_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bot123:abc/sendMessage"))
        .and(query_param("chat_id", "-1001234"))
        .and(query_param("text", "Pipeline started\nPhiên chạy mới"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let channel = TelegramNotifier::new("123:abc", "-1001234", Duration::from_secs(5))
        .unwrap()
        .with_api_base(mock_server.uri());

    let status = channel.send("Pipeline started\nPhiên chạy mới").await.unwrap();
    assert!(status.success);
    assert_eq!(status.channel, "telegram");
}

#[tokio::test]
async fn test_telegram_rejection_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let channel = TelegramNotifier::new("bad", "-1", Duration::from_secs(5))
        .unwrap()
        .with_api_base(mock_server.uri());

    let status = channel.send("hello").await.unwrap();
    assert!(!status.success);
    assert!(status.message.unwrap().contains("401"));
}

#[tokio::test]
async fn test_webhook_posts_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/hooks/jobs"))
        .and(body_json(serde_json::json!({ "text": "run finished" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let channel = WebhookNotifier::new(
        format!("{}/hooks/jobs", mock_server.uri()),
        Duration::from_secs(5),
    )
    .unwrap();

    let status = channel.send("run finished").await.unwrap();
    assert!(status.success);
}

#[tokio::test]
async fn test_announce_reaches_every_channel() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bot42:xyz/sendMessage"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Webhook failure must not stop the telegram delivery
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = NotificationConfig {
        telegram_bot_token: Some("42:xyz".to_string()),
        telegram_chat_id: Some("-100".to_string()),
        telegram_api_base: Some(mock_server.uri()),
        webhook_url: Some(format!("{}/hook", mock_server.uri())),
    };
    let notifiers = from_config(&config, Duration::from_secs(5));
    let statuses = announce(&notifiers, &start_message(1)).await;

    assert_eq!(statuses.len(), 2);
    assert!(statuses[0].success);
    assert!(!statuses[1].success);
}
