//! Telegram bot channel
//!
//! Uses the bot API `sendMessage` method with query parameters, so no request
//! body is needed.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::{ChannelError, ChannelResult, DeliveryStatus, Notifier};
use crate::utils::truncate_text;

/// Public Telegram bot API
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Longest message `sendMessage` accepts
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Telegram notification channel
pub struct TelegramNotifier {
    api_base: String,
    token: String,
    chat_id: String,
    client: Client,
}

impl TelegramNotifier {
    /// Create a channel for `chat_id` using bot `token`
    pub fn new(
        token: impl Into<String>,
        chat_id: impl Into<String>,
        timeout: Duration,
    ) -> ChannelResult<Self> {
        let token = token.into();
        let chat_id = chat_id.into();
        if token.trim().is_empty() || chat_id.trim().is_empty() {
            return Err(ChannelError::InvalidConfig(
                "Telegram token and chat id are required".to_string(),
            ));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token,
            chat_id,
            client,
        })
    }

    /// Point the channel at another API host
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, text: &str) -> ChannelResult<DeliveryStatus> {
        let text = truncate_text(text, MAX_MESSAGE_CHARS);
        let request = self
            .client
            .get(self.endpoint())
            .query(&[("chat_id", self.chat_id.as_str()), ("text", text.as_str())]);

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!(chat_id = %self.chat_id, "Telegram message delivered");
                Ok(DeliveryStatus::success("telegram"))
            }
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                let error = ChannelError::Rejected { status, body };
                tracing::error!(chat_id = %self.chat_id, error = %error, "Telegram rejected message");
                Ok(DeliveryStatus::failure("telegram", error.to_string()))
            }
            Err(e) => {
                // Token is part of the URL; keep it out of the logs
                let e = e.without_url();
                tracing::error!(chat_id = %self.chat_id, error = %e, "Failed to reach Telegram");
                Ok(DeliveryStatus::failure("telegram", e.to_string()))
            }
        }
    }
}
