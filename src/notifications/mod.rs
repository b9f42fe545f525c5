//! Run status notifications
//!
//! A run announces itself when it starts and reports its outcome when it
//! ends. Delivery is best-effort: a channel that fails is logged and the run
//! result is unaffected.
//!
//! ```text
//!        announce(text)
//!              │
//!      ┌───────┴────────┐
//!      ▼                ▼
//! ┌──────────┐    ┌─────────┐
//! │ Telegram │    │ Webhook │     (NoopNotifier when neither is set)
//! └──────────┘    └─────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use jobsnitch::config::Config;
//! use jobsnitch::notifications::{announce, from_config, start_message};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let notifiers = from_config(&config.notifications, config.request_timeout());
//! announce(&notifiers, &start_message(config.crawler.max_pages)).await;
//! # Ok(())
//! # }
//! ```

pub mod channels;

use std::time::Duration;

use crate::config::NotificationConfig;
use crate::crawler::RunSummary;

pub use channels::telegram::TelegramNotifier;
pub use channels::webhook::WebhookNotifier;
pub use channels::{ChannelError, ChannelResult, DeliveryStatus, NoopNotifier, Notifier};

/// Build every channel the configuration enables
///
/// A channel with invalid settings is logged and left out. With nothing
/// usable the result holds a single [`NoopNotifier`].
pub fn from_config(config: &NotificationConfig, timeout: Duration) -> Vec<Box<dyn Notifier>> {
    let mut notifiers: Vec<Box<dyn Notifier>> = Vec::new();

    match (&config.telegram_bot_token, &config.telegram_chat_id) {
        (Some(token), Some(chat_id)) => match TelegramNotifier::new(token, chat_id, timeout) {
            Ok(channel) => {
                let channel = match &config.telegram_api_base {
                    Some(base) => channel.with_api_base(base),
                    None => channel,
                };
                notifiers.push(Box::new(channel));
            }
            Err(e) => tracing::warn!(error = %e, "Telegram channel disabled"),
        },
        (Some(_), None) | (None, Some(_)) => {
            tracing::warn!("Telegram needs both a bot token and a chat id; channel disabled");
        }
        (None, None) => {}
    }

    if let Some(url) = &config.webhook_url {
        match WebhookNotifier::new(url, timeout) {
            Ok(channel) => notifiers.push(Box::new(channel)),
            Err(e) => tracing::warn!(error = %e, "Webhook channel disabled"),
        }
    }

    if notifiers.is_empty() {
        notifiers.push(Box::new(NoopNotifier));
    }

    notifiers
}

/// Send `text` through every channel, never failing the caller
pub async fn announce(notifiers: &[Box<dyn Notifier>], text: &str) -> Vec<DeliveryStatus> {
    let mut statuses = Vec::with_capacity(notifiers.len());

    for notifier in notifiers {
        let status = match notifier.send(text).await {
            Ok(status) => status,
            Err(e) => DeliveryStatus::failure(notifier.name(), e.to_string()),
        };
        if !status.success {
            tracing::warn!(channel = notifier.name(), status = %status, "Notification not delivered");
        }
        statuses.push(status);
    }

    statuses
}

/// Message sent when a run begins
pub fn start_message(max_pages: u32) -> String {
    format!("jobsnitch: pipeline started (scanning {max_pages} listing page(s))")
}

/// Message summarizing a finished run
pub fn run_status_message(summary: &RunSummary) -> String {
    let verdict = if summary.verification.passed {
        "verification passed"
    } else {
        "VERIFICATION FAILED"
    };

    format!(
        "jobsnitch: {verdict}\n\
         discovered: {}\n\
         inserted: {}\n\
         duplicates: {}\n\
         skipped: {}\n\
         stored since {}: {}",
        summary.discovered,
        summary.report.inserted,
        summary.report.duplicates,
        summary.report.skipped.len(),
        summary.verification.cutoff.format("%Y-%m-%d %H:%M UTC"),
        summary.verification.observed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::verify_counts;
    use crate::crawler::Verification;
    use crate::models::ScrapeReport;
    use chrono::Utc;

    fn summary(expected: u64, observed: u64) -> RunSummary {
        RunSummary {
            discovered: 4,
            report: ScrapeReport {
                total: 4,
                inserted: expected as usize,
                duplicates: 1,
                skipped: Vec::new(),
            },
            verification: Verification {
                expected,
                observed,
                cutoff: Utc::now(),
                passed: verify_counts(expected, observed),
            },
        }
    }

    #[test]
    fn test_empty_config_yields_noop() {
        let notifiers = from_config(&NotificationConfig::default(), Duration::from_secs(5));
        assert_eq!(notifiers.len(), 1);
        assert_eq!(notifiers[0].name(), "noop");
    }

    #[test]
    fn test_half_configured_telegram_is_disabled() {
        let config = NotificationConfig {
            telegram_bot_token: Some("123:abc".to_string()),
            ..Default::default()
        };
        let notifiers = from_config(&config, Duration::from_secs(5));
        assert_eq!(notifiers[0].name(), "noop");
    }

    #[test]
    fn test_both_channels_enabled() {
        let config = NotificationConfig {
            telegram_bot_token: Some("123:abc".to_string()),
            telegram_chat_id: Some("-100".to_string()),
            telegram_api_base: None,
            webhook_url: Some("https://example.com/hook".to_string()),
        };
        let names: Vec<_> = from_config(&config, Duration::from_secs(5))
            .iter()
            .map(|n| n.name().to_string())
            .collect();
        assert_eq!(names, ["telegram", "webhook"]);
    }

    #[test]
    fn test_run_status_message() {
        let ok = run_status_message(&summary(3, 3));
        assert!(ok.contains("verification passed"));
        assert!(ok.contains("inserted: 3"));

        let failed = run_status_message(&summary(3, 1));
        assert!(failed.contains("VERIFICATION FAILED"));
    }

    #[tokio::test]
    async fn test_announce_with_noop() {
        let notifiers = from_config(&NotificationConfig::default(), Duration::from_secs(5));
        let statuses = announce(&notifiers, &start_message(2)).await;
        assert_eq!(statuses.len(), 1);
        assert!(statuses[0].success);
    }
}
