//! Sentiment aggregation across discussion forums
//!
//! The aggregator queries each forum once, applies the authoritative date
//! window, folds reply scores into each item, and resamples the pooled
//! items into a gap-free daily series. A failing forum is isolated: its
//! failure lands in the report while the remaining forums still contribute.

use crate::config::CollectorConfig;
use crate::error::{PulseError, Result};
use crate::score::PolarityScorer;
use crate::series::{ScoredItem, SentimentSeries};
use crate::source::{DiscussionSource, Post};
use crate::throttle::Throttle;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

/// Per-forum collection counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForumStats {
    /// Search results examined, including date-rejected ones
    pub items_seen: usize,
    /// Items that passed the window check and were scored
    pub items_scored: usize,
}

/// What happened to one forum during an aggregation call
#[derive(Debug)]
pub struct ForumOutcome {
    pub forum: String,
    pub result: Result<ForumStats>,
}

/// Aggregation output: the daily series plus per-forum outcomes
#[derive(Debug)]
pub struct AggregateReport {
    pub series: SentimentSeries,
    pub forums: Vec<ForumOutcome>,
}

impl AggregateReport {
    /// Number of forums whose query failed
    pub fn failed_forums(&self) -> usize {
        self.forums.iter().filter(|o| o.result.is_err()).count()
    }
}

/// Aggregates scored discussion items into a daily sentiment series
pub struct SentimentAggregator<S, P> {
    source: S,
    scorer: P,
    config: Arc<CollectorConfig>,
    throttle: Arc<Throttle>,
}

impl<S, P> SentimentAggregator<S, P>
where
    S: DiscussionSource,
    P: PolarityScorer,
{
    pub fn new(
        source: S,
        scorer: P,
        config: Arc<CollectorConfig>,
        throttle: Arc<Throttle>,
    ) -> Self {
        Self {
            source,
            scorer,
            config,
            throttle,
        }
    }

    /// Collect and score discussion items for `ticker` across `forums`,
    /// then resample to a daily series.
    ///
    /// Forums are processed independently and each is tried exactly once;
    /// a failure (auth, network, source-side, deadline) abandons that
    /// forum's remaining work and is recorded in the report without
    /// aborting the others. Zero matching items yield an empty series,
    /// not an error.
    pub async fn aggregate(
        &self,
        ticker: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        forums: &[String],
    ) -> AggregateReport {
        let query = build_query(ticker);
        let mut pool: Vec<ScoredItem> = Vec::new();
        let mut outcomes = Vec::with_capacity(forums.len());

        for forum in forums {
            let collected = tokio::time::timeout(
                self.config.forum_deadline,
                self.collect_forum(forum, &query, start, end, &mut pool),
            )
            .await;

            let result = match collected {
                Ok(Ok(stats)) => Ok(stats),
                Ok(Err(e)) => Err(PulseError::ForumQuery {
                    forum: forum.clone(),
                    reason: e.to_string(),
                }),
                Err(_) => Err(PulseError::ForumDeadline {
                    forum: forum.clone(),
                }),
            };

            match &result {
                Ok(stats) => info!(
                    forum = %forum,
                    seen = stats.items_seen,
                    scored = stats.items_scored,
                    "forum collected"
                ),
                Err(e) => warn!(forum = %forum, error = %e, "forum failed, continuing"),
            }

            outcomes.push(ForumOutcome {
                forum: forum.clone(),
                result,
            });
        }

        AggregateReport {
            series: SentimentSeries::from_items(&pool),
            forums: outcomes,
        }
    }

    async fn collect_forum(
        &self,
        forum: &str,
        query: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        pool: &mut Vec<ScoredItem>,
    ) -> Result<ForumStats> {
        let posts = self
            .source
            .search_posts(forum, query, self.config.max_items_per_forum)
            .await?;

        let mut stats = ForumStats::default();
        for post in posts {
            stats.items_seen += 1;

            // Authoritative inclusive window check; the source's recency
            // filter is only a pre-filter.
            if post.created_utc < start || post.created_utc > end {
                if self.config.throttle_filtered_items {
                    self.throttle.acquire().await;
                }
                continue;
            }

            let score = self.score_item(&post).await?;
            pool.push(ScoredItem {
                timestamp: post.created_utc,
                score,
            });
            stats.items_scored += 1;

            self.throttle.acquire().await;
        }

        Ok(stats)
    }

    /// Combined scalar for one item: the post text's polarity plus the
    /// polarity of each counted top-level reply
    async fn score_item(&self, post: &Post) -> Result<f64> {
        let text = format!("{} {}", post.title, post.body);
        let mut score = self.scorer.score(&text);

        let replies = self
            .source
            .top_replies(post, self.config.max_replies_per_item)
            .await?;
        for reply in &replies {
            score += self.scorer.score(reply);
        }

        Ok(score)
    }
}

/// Search query matching the cashtag and the bare symbol
fn build_query(ticker: &str) -> String {
    let ticker = ticker.to_uppercase();
    format!("{ticker} OR ${ticker}")
}
