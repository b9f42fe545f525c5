//! Webhook notification channel
//!
//! Posts `{"text": ...}` as JSON, the shape Slack-style incoming webhooks accept.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::{ChannelError, ChannelResult, DeliveryStatus, Notifier};

/// Webhook notification channel
pub struct WebhookNotifier {
    url: String,
    client: Client,
}

impl WebhookNotifier {
    /// Create a webhook channel posting to `url`
    pub fn new(url: impl Into<String>, timeout: Duration) -> ChannelResult<Self> {
        let url = url.into();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ChannelError::InvalidConfig(
                "Webhook URL must start with http:// or https://".to_string(),
            ));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { url, client })
    }

    /// Get the webhook URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn send(&self, text: &str) -> ChannelResult<DeliveryStatus> {
        let payload = serde_json::json!({ "text": text });

        match self.client.post(&self.url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!(url = %self.url, "Webhook delivered");
                Ok(DeliveryStatus::success("webhook"))
            }
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                let error = ChannelError::Rejected { status, body };
                tracing::error!(url = %self.url, error = %error, "Webhook rejected");
                Ok(DeliveryStatus::failure("webhook", error.to_string()))
            }
            Err(e) => {
                tracing::error!(url = %self.url, error = %e, "Failed to deliver webhook");
                Ok(DeliveryStatus::failure("webhook", e.to_string()))
            }
        }
    }
}
