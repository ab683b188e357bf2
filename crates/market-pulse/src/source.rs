//! The discussion-source seam

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;

/// One discussion post, before reply materialization
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Source-assigned identifier
    pub id: String,
    /// Forum the post was found in
    pub forum: String,
    /// Post title
    pub title: String,
    /// Post body text (may be empty for link posts)
    pub body: String,
    /// Creation timestamp, supplied by the source
    pub created_utc: DateTime<Utc>,
    /// Reply count reported by the source
    pub num_replies: u64,
}

/// A paginated, searchable discussion source (e.g. Reddit)
///
/// `search_posts` applies the source's own trailing-one-year recency filter
/// as a cheap pre-filter; callers still perform the authoritative
/// date-window check. `top_replies` materializes at most `max` top-level
/// reply bodies with removed/deleted placeholders already excluded, and
/// never recurses into nested replies.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DiscussionSource: Send + Sync {
    /// Search a forum for posts matching `query`, up to `max_items` results
    async fn search_posts(
        &self,
        forum: &str,
        query: &str,
        max_items: usize,
    ) -> Result<Vec<Post>>;

    /// Materialize up to `max` substantive top-level replies for a post
    async fn top_replies(&self, post: &Post, max: usize) -> Result<Vec<String>>;
}
