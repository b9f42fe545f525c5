//! HTTP fetcher with user-agent rotation, rate limiting and fixed-delay retry
//!
//! Every request passes through a shared `governor` limiter. The first attempt
//! of a fetch carries a user agent drawn from the configured pool; retries fall
//! back to the client's default user agent.

use crate::config::CrawlerConfig;
use crate::crawler::headers::build_page_headers;
use crate::utils::error::FetchError;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use rand::seq::SliceRandom;
use reqwest::Client;
use std::num::NonZeroU32;
use std::time::Duration;

/// TopCV page fetcher
pub struct Fetcher {
    /// HTTP client with configured timeout, compression and default user agent
    client: Client,

    /// Rate limiter to control request frequency
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,

    /// Pool for first-attempt user-agent rotation
    user_agents: Vec<String>,

    /// Additional attempts after the first failure
    max_retries: u32,

    /// Fixed wait between attempts
    retry_delay: Duration,
}

impl Fetcher {
    /// Create a fetcher from crawler settings
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(config: &CrawlerConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.default_user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .gzip(true)
            .cookie_store(true)
            .build()?;

        let rate = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(rate));

        Ok(Self {
            client,
            rate_limiter,
            user_agents: config.user_agents.clone(),
            max_retries: config.max_retries,
            retry_delay: Duration::from_secs(config.retry_delay_secs),
        })
    }

    /// Total attempts a failing fetch makes before giving up
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Fetch a page, retrying every failure with a fixed delay
    ///
    /// Non-success statuses and transport errors are treated alike. After
    /// `max_retries` additional attempts the URL is reported as unreachable.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Unreachable` when every attempt failed
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let attempts = self.max_attempts();

        for attempt in 1..=attempts {
            if attempt > 1 {
                tokio::time::sleep(self.retry_delay).await;
            }

            let user_agent = (attempt == 1).then(|| self.random_user_agent()).flatten();

            match self.attempt(url, user_agent).await {
                Ok(body) => {
                    if attempt > 1 {
                        tracing::debug!(url = %url, attempt, "Fetch succeeded after retry");
                    }
                    return Ok(body);
                }
                Err(e) => {
                    tracing::warn!(
                        url = %url,
                        attempt,
                        max_attempts = attempts,
                        error = %e,
                        "Fetch attempt failed"
                    );
                }
            }
        }

        Err(FetchError::Unreachable {
            url: url.to_string(),
            attempts,
        })
    }

    /// Single attempt with a rotated user agent, no retry
    ///
    /// # Errors
    ///
    /// Returns the underlying transport, timeout or status error
    pub async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        self.attempt(url, self.random_user_agent()).await
    }

    async fn attempt(&self, url: &str, user_agent: Option<&str>) -> Result<String, FetchError> {
        self.rate_limiter.until_ready().await;

        let response = self
            .client
            .get(url)
            .headers(build_page_headers(user_agent))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout
                } else {
                    FetchError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    /// Pick a user agent uniformly from the pool
    fn random_user_agent(&self) -> Option<&str> {
        let mut rng = rand::thread_rng();
        self.user_agents.choose(&mut rng).map(String::as_str)
    }
}
