//! Market price and social sentiment collection
//!
//! This crate collects two time-aligned daily signals for a market ticker
//! over a date range:
//!
//! - Price statistics from Yahoo Finance: daily OHLCV plus close-to-close
//!   returns and a rolling annualized realized volatility
//! - A daily aggregated sentiment score from Reddit discussion mentioning
//!   the ticker, scored with a VADER lexicon and resampled into a gap-free
//!   daily series with forward-fill
//!
//! The two pipelines are independent; the `collector` binary runs both and
//! exports each to CSV.
//!
//! # Architecture
//!
//! - `PriceSeriesBuilder` wraps the quote-history lookup and derives the
//!   return columns
//! - `SentimentAggregator` pages a rate-limited discussion source per
//!   forum, applies the authoritative date window, folds reply scores into
//!   each item, and resamples the pool into a `SentimentSeries`
//! - One shared `Throttle` paces every request to the discussion source,
//!   since the rate budget is account-level rather than per-forum
//! - Forum failures are isolated and reported per forum; they never abort
//!   the aggregation
//!
//! # Example
//!
//! ```rust,ignore
//! use market_pulse::{
//!     CollectorConfig, LexiconScorer, RedditCredentials, RedditClient,
//!     SentimentAggregator, Throttle,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(
//!         CollectorConfig::builder()
//!             .reddit(RedditCredentials::from_env()?)
//!             .build()?,
//!     );
//!     let throttle = Arc::new(Throttle::with_interval(config.rate_limit_delay));
//!
//!     let source = RedditClient::new(&config, Arc::clone(&throttle))?;
//!     let aggregator =
//!         SentimentAggregator::new(source, LexiconScorer::new(), config, throttle);
//!
//!     let forums = vec!["wallstreetbets".to_string(), "stocks".to_string()];
//!     let report = aggregator.aggregate("AAPL", start, end, &forums).await;
//!     println!("{} days of sentiment", report.series.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod price;
pub mod score;
pub mod sentiment;
pub mod series;
pub mod source;
pub mod throttle;

// Re-export main types for convenience
pub use api::{Quote, RedditClient, YahooFinanceClient};
pub use config::{CollectorConfig, RedditCredentials};
pub use error::{PulseError, Result};
pub use price::{PriceFrame, PriceRow, PriceSeriesBuilder};
pub use score::{LexiconScorer, PolarityScorer};
pub use sentiment::{AggregateReport, ForumOutcome, ForumStats, SentimentAggregator};
pub use series::{ScoredItem, SentimentSeries};
pub use source::{DiscussionSource, Post};
pub use throttle::Throttle;
