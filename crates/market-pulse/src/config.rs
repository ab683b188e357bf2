//! Configuration for collection runs

use crate::error::{PulseError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Credentials for the Reddit API (script-type app)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditCredentials {
    /// OAuth client identifier
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// User-agent string sent on every request (required by Reddit)
    pub user_agent: String,
}

impl RedditCredentials {
    /// Create credentials from explicit values
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Load credentials from `REDDIT_CLIENT_ID`, `REDDIT_CLIENT_SECRET` and
    /// `REDDIT_USER_AGENT`.
    ///
    /// A missing variable is a startup failure, not a runtime condition.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| {
            std::env::var(name)
                .map_err(|_| PulseError::ConfigError(format!("{name} is not set")))
        };

        Ok(Self {
            client_id: var("REDDIT_CLIENT_ID")?,
            client_secret: var("REDDIT_CLIENT_SECRET")?,
            user_agent: var("REDDIT_USER_AGENT")?,
        })
    }
}

/// Configuration for collection runs
///
/// Validated once at startup, immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Discussion source credentials
    pub reddit: RedditCredentials,

    /// Top-level replies folded into each item's score
    pub max_replies_per_item: usize,

    /// Upper bound on search results per forum per call
    pub max_items_per_forum: usize,

    /// Interval of the shared request throttle
    pub rate_limit_delay: Duration,

    /// Whether items rejected by the date filter still pay the throttle pause
    pub throttle_filtered_items: bool,

    /// Time budget per forum; a forum past it counts as a failed forum
    pub forum_deadline: Duration,

    /// Search results requested per page (Reddit caps this at 100)
    pub page_size: u32,

    /// HTTP request timeout
    pub request_timeout: Duration,
}

impl CollectorConfig {
    /// Create a new configuration builder
    pub fn builder() -> CollectorConfigBuilder {
        CollectorConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.reddit.client_id.is_empty() || self.reddit.client_secret.is_empty() {
            return Err(PulseError::ConfigError(
                "Reddit client_id and client_secret must not be empty".to_string(),
            ));
        }

        if self.reddit.user_agent.is_empty() {
            return Err(PulseError::ConfigError(
                "Reddit user_agent must not be empty".to_string(),
            ));
        }

        if self.max_items_per_forum == 0 {
            return Err(PulseError::ConfigError(
                "max_items_per_forum must be greater than 0".to_string(),
            ));
        }

        if self.page_size == 0 || self.page_size > 100 {
            return Err(PulseError::ConfigError(
                "page_size must be within 1..=100".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for CollectorConfig
#[derive(Debug, Default)]
pub struct CollectorConfigBuilder {
    reddit: Option<RedditCredentials>,
    max_replies_per_item: Option<usize>,
    max_items_per_forum: Option<usize>,
    rate_limit_delay: Option<Duration>,
    throttle_filtered_items: Option<bool>,
    forum_deadline: Option<Duration>,
    page_size: Option<u32>,
    request_timeout: Option<Duration>,
}

impl CollectorConfigBuilder {
    /// Set the discussion source credentials
    pub fn reddit(mut self, credentials: RedditCredentials) -> Self {
        self.reddit = Some(credentials);
        self
    }

    /// Set the number of replies folded into each item's score
    pub fn max_replies_per_item(mut self, max: usize) -> Self {
        self.max_replies_per_item = Some(max);
        self
    }

    /// Set the search-result bound per forum
    pub fn max_items_per_forum(mut self, max: usize) -> Self {
        self.max_items_per_forum = Some(max);
        self
    }

    /// Set the shared throttle interval
    pub fn rate_limit_delay(mut self, delay: Duration) -> Self {
        self.rate_limit_delay = Some(delay);
        self
    }

    /// Set whether date-rejected items still pay the throttle pause
    pub fn throttle_filtered_items(mut self, enabled: bool) -> Self {
        self.throttle_filtered_items = Some(enabled);
        self
    }

    /// Set the per-forum time budget
    pub fn forum_deadline(mut self, deadline: Duration) -> Self {
        self.forum_deadline = Some(deadline);
        self
    }

    /// Set the search page size
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Set the HTTP request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<CollectorConfig> {
        let reddit = self.reddit.ok_or_else(|| {
            PulseError::ConfigError("Reddit credentials are required".to_string())
        })?;

        let config = CollectorConfig {
            reddit,
            max_replies_per_item: self.max_replies_per_item.unwrap_or(5),
            max_items_per_forum: self.max_items_per_forum.unwrap_or(500),
            rate_limit_delay: self.rate_limit_delay.unwrap_or(Duration::from_millis(500)),
            throttle_filtered_items: self.throttle_filtered_items.unwrap_or(true),
            forum_deadline: self.forum_deadline.unwrap_or(Duration::from_secs(120)),
            page_size: self.page_size.unwrap_or(100),
            request_timeout: self.request_timeout.unwrap_or(Duration::from_secs(30)),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> RedditCredentials {
        RedditCredentials::new("id", "secret", "market-pulse test agent")
    }

    #[test]
    fn test_builder_defaults() {
        let config = CollectorConfig::builder()
            .reddit(credentials())
            .build()
            .unwrap();

        assert_eq!(config.max_replies_per_item, 5);
        assert_eq!(config.max_items_per_forum, 500);
        assert_eq!(config.rate_limit_delay, Duration::from_millis(500));
        assert!(config.throttle_filtered_items);
        assert_eq!(config.page_size, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = CollectorConfig::builder()
            .reddit(credentials())
            .max_replies_per_item(3)
            .max_items_per_forum(50)
            .rate_limit_delay(Duration::from_millis(100))
            .throttle_filtered_items(false)
            .page_size(25)
            .build()
            .unwrap();

        assert_eq!(config.max_replies_per_item, 3);
        assert_eq!(config.max_items_per_forum, 50);
        assert_eq!(config.rate_limit_delay, Duration::from_millis(100));
        assert!(!config.throttle_filtered_items);
        assert_eq!(config.page_size, 25);
    }

    #[test]
    fn test_missing_credentials() {
        let result = CollectorConfig::builder().build();
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_credentials_rejected() {
        let result = CollectorConfig::builder()
            .reddit(RedditCredentials::new("", "", "agent"))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let result = CollectorConfig::builder()
            .reddit(RedditCredentials::new("id", "secret", ""))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_page_size_bounds() {
        let result = CollectorConfig::builder()
            .reddit(credentials())
            .page_size(0)
            .build();
        assert!(result.is_err());

        let result = CollectorConfig::builder()
            .reddit(credentials())
            .page_size(101)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_item_bound_rejected() {
        let result = CollectorConfig::builder()
            .reddit(credentials())
            .max_items_per_forum(0)
            .build();
        assert!(result.is_err());
    }
}
