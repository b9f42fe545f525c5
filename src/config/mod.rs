//! Configuration management for jobsnitch crawler
//!
//! This module handles loading and validating configuration from environment variables
//! and TOML files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Browser user agents rotated on the first attempt of every fetch
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:54.0) Gecko/20100101 Firefox/54.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_6) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/11.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/61.0.3163.100 Safari/537.36",
];

/// IT job listing (category family r257)
pub const DEFAULT_LISTING_URL: &str = "https://www.topcv.vn/tim-viec-lam-cong-nghe-thong-tin-cr257";

/// "1 day ago" as rendered on listing cards
pub const DEFAULT_RECENCY_LABEL: &str = "1 ngày trước";

/// Longest accepted verification window, ten years
pub const MAX_WINDOW_DAYS: i64 = 3650;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Crawler configuration
    pub crawler: CrawlerConfig,

    /// Storage configuration
    pub storage: StorageConfig,

    /// Post-run verification
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Run status notifications
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Crawler-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Listing page URL without query string
    pub listing_base_url: String,

    /// Request newest-first ordering on listing pages
    pub sort_new: bool,

    /// Listing pages scanned per run
    pub max_pages: u32,

    /// Exact card label accepted by discovery
    pub recency_label: String,

    /// Pool for user-agent rotation
    pub user_agents: Vec<String>,

    /// User agent sent on retries
    pub default_user_agent: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Global request rate limit
    pub requests_per_second: u32,

    /// Retries after the first failed attempt
    pub max_retries: u32,

    /// Fixed delay between attempts, in seconds
    pub retry_delay_secs: u64,

    /// Delay between detail pages, in seconds
    pub politeness_delay_secs: u64,

    /// Length of the derived record id
    pub id_length: usize,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite database path
    pub sqlite_path: PathBuf,
}

/// Verification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Days of `_scraped_at` history counted by the verifier
    pub window_days: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self { window_days: 2 }
    }
}

/// Notification configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Telegram bot token
    pub telegram_bot_token: Option<String>,

    /// Telegram chat or channel id
    pub telegram_chat_id: Option<String>,

    /// Telegram API base, overridable for testing
    pub telegram_api_base: Option<String>,

    /// Generic webhook receiving `{"text": ...}`
    pub webhook_url: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to [`Config::default`]. A `.env` file in the
    /// working directory is honoured.
    pub fn from_env() -> Result<Self> {
        // A missing .env file is the normal case in production
        let _ = dotenvy::dotenv();

        let defaults = Self::default();
        let crawler = CrawlerConfig {
            listing_base_url: std::env::var("JOBSNITCH_LISTING_URL")
                .unwrap_or(defaults.crawler.listing_base_url),
            sort_new: env_parse("JOBSNITCH_SORT_NEW").unwrap_or(defaults.crawler.sort_new),
            max_pages: env_parse("JOBSNITCH_MAX_PAGES").unwrap_or(defaults.crawler.max_pages),
            recency_label: std::env::var("JOBSNITCH_RECENCY_LABEL")
                .unwrap_or(defaults.crawler.recency_label),
            user_agents: std::env::var("JOBSNITCH_USER_AGENTS")
                .ok()
                .map(|v| {
                    v.split('|')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or(defaults.crawler.user_agents),
            default_user_agent: std::env::var("JOBSNITCH_USER_AGENT")
                .unwrap_or(defaults.crawler.default_user_agent),
            request_timeout_secs: env_parse("JOBSNITCH_REQUEST_TIMEOUT")
                .unwrap_or(defaults.crawler.request_timeout_secs),
            requests_per_second: env_parse("JOBSNITCH_RATE_LIMIT")
                .unwrap_or(defaults.crawler.requests_per_second),
            max_retries: env_parse("JOBSNITCH_MAX_RETRIES").unwrap_or(defaults.crawler.max_retries),
            retry_delay_secs: env_parse("JOBSNITCH_RETRY_DELAY")
                .unwrap_or(defaults.crawler.retry_delay_secs),
            politeness_delay_secs: env_parse("JOBSNITCH_POLITENESS_DELAY")
                .unwrap_or(defaults.crawler.politeness_delay_secs),
            id_length: env_parse("JOBSNITCH_ID_LENGTH").unwrap_or(defaults.crawler.id_length),
        };

        let sqlite_path = std::env::var("JOBSNITCH_SQLITE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage.sqlite_path);

        let window_days = env_parse("JOBSNITCH_VERIFY_WINDOW_DAYS")
            .unwrap_or(defaults.verification.window_days);

        let notifications = NotificationConfig {
            telegram_bot_token: std::env::var("TELEGRAM_BOT_TOKEN").ok(),
            telegram_chat_id: std::env::var("TELEGRAM_CHANNEL_CHAT_ID").ok(),
            telegram_api_base: std::env::var("TELEGRAM_API_BASE").ok(),
            webhook_url: std::env::var("JOBSNITCH_WEBHOOK_URL").ok(),
        };

        let log_level =
            std::env::var("JOBSNITCH_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));
        let log_format =
            std::env::var("JOBSNITCH_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            crawler,
            storage: StorageConfig { sqlite_path },
            verification: VerificationConfig { window_days },
            notifications,
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.crawler.max_pages == 0 {
            anyhow::bail!("max_pages must be greater than 0");
        }

        if self.crawler.user_agents.is_empty() {
            anyhow::bail!("user_agents must not be empty");
        }

        if self.crawler.requests_per_second == 0 {
            anyhow::bail!("requests_per_second must be greater than 0");
        }

        if self.crawler.id_length == 0 || self.crawler.id_length > 43 {
            anyhow::bail!("id_length must be between 1 and 43");
        }

        if self.crawler.recency_label.trim().is_empty() {
            anyhow::bail!("recency_label must not be empty");
        }

        url::Url::parse(&self.crawler.listing_base_url)
            .with_context(|| format!("Invalid listing URL: {}", self.crawler.listing_base_url))?;

        if !(1..=MAX_WINDOW_DAYS).contains(&self.verification.window_days) {
            anyhow::bail!("window_days must be between 1 and {MAX_WINDOW_DAYS}");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.crawler.request_timeout_secs)
    }

    /// Delay between detail pages
    #[must_use]
    pub fn politeness_delay(&self) -> Duration {
        Duration::from_secs(self.crawler.politeness_delay_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig {
                listing_base_url: DEFAULT_LISTING_URL.to_string(),
                sort_new: true,
                max_pages: 1,
                recency_label: DEFAULT_RECENCY_LABEL.to_string(),
                user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
                default_user_agent: format!("jobsnitch/{}", env!("CARGO_PKG_VERSION")),
                request_timeout_secs: 30,
                requests_per_second: 1,
                max_retries: 5,
                retry_delay_secs: 60,
                politeness_delay_secs: 2,
                id_length: 8,
            },
            storage: StorageConfig {
                sqlite_path: PathBuf::from("data/jobs.db"),
            },
            verification: VerificationConfig::default(),
            notifications: NotificationConfig::default(),
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}
