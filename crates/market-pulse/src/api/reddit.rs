//! Reddit API client for forum search and reply retrieval
//!
//! Uses the OAuth2 client-credentials flow (script app). Reddit requires a
//! descriptive User-Agent on every request and caps search pages at 100
//! results, so paging follows the `after` cursor until the listing is
//! exhausted or the caller's item bound is reached.

use crate::config::{CollectorConfig, RedditCredentials};
use crate::error::{PulseError, Result};
use crate::source::{DiscussionSource, Post};
use crate::throttle::Throttle;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const OAUTH_BASE_URL: &str = "https://oauth.reddit.com";

/// Listing envelope used by every Reddit collection endpoint
#[derive(Debug, Deserialize)]
struct Listing<T> {
    data: ListingData<T>,
}

#[derive(Debug, Deserialize)]
struct ListingData<T> {
    children: Vec<Thing<T>>,
    #[serde(default)]
    after: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Thing<T> {
    kind: String,
    data: T,
}

/// Search-result payload (kind `t3`)
#[derive(Debug, Deserialize)]
struct PostData {
    id: String,
    title: String,
    #[serde(default)]
    selftext: String,
    created_utc: f64,
    #[serde(default)]
    num_comments: u64,
}

/// Comment payload (kind `t1`; `more` stubs deserialize with an empty body)
#[derive(Debug, Deserialize)]
struct CommentData {
    #[serde(default)]
    body: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Clone)]
struct BearerToken {
    token: String,
    expires_at: Instant,
}

/// Reddit API client
pub struct RedditClient {
    client: Client,
    credentials: RedditCredentials,
    throttle: Arc<Throttle>,
    token: Mutex<Option<BearerToken>>,
    page_size: u32,
}

impl RedditClient {
    /// Create a client from validated configuration.
    ///
    /// Every request made through this client waits on the shared throttle
    /// first, so the account-level rate budget is honored regardless of
    /// which endpoint is hit.
    pub fn new(config: &CollectorConfig, throttle: Arc<Throttle>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.reddit.user_agent.clone())
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            credentials: config.reddit.clone(),
            throttle,
            token: Mutex::new(None),
            page_size: config.page_size,
        })
    }

    /// Get a bearer token, refreshing it when stale
    async fn bearer_token(&self) -> Result<String> {
        let mut slot = self.token.lock().await;

        if let Some(cached) = slot.as_ref() {
            if cached.expires_at > Instant::now() {
                return Ok(cached.token.clone());
            }
        }

        self.throttle.acquire().await;

        let response = self
            .client
            .post(TOKEN_URL)
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(PulseError::AuthError(format!(
                "token request rejected: {status}"
            )));
        }
        if !status.is_success() {
            return Err(PulseError::ApiError(format!(
                "token request failed: {status}"
            )));
        }

        let token: TokenResponse = response.json().await?;

        // Refresh a minute before the reported expiry.
        let lifetime = Duration::from_secs(token.expires_in.saturating_sub(60).max(1));
        slot.replace(BearerToken {
            token: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });

        debug!("obtained Reddit bearer token");
        Ok(token.access_token)
    }

    async fn fetch_search_page(
        &self,
        forum: &str,
        query: &str,
        after: Option<&str>,
    ) -> Result<Listing<PostData>> {
        let token = self.bearer_token().await?;
        self.throttle.acquire().await;

        let url = format!("{OAUTH_BASE_URL}/r/{forum}/search");
        let mut request = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .query(&[
                ("q", query),
                ("restrict_sr", "1"),
                ("sort", "new"),
                ("t", "year"),
                ("raw_json", "1"),
            ])
            .query(&[("limit", self.page_size)]);

        if let Some(cursor) = after {
            request = request.query(&[("after", cursor)]);
        }

        let response = request.send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(PulseError::AuthError(format!(
                "r/{forum} search rejected: {status}"
            )));
        }
        if !status.is_success() {
            return Err(PulseError::ApiError(format!(
                "r/{forum} search failed: {status}"
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl DiscussionSource for RedditClient {
    async fn search_posts(
        &self,
        forum: &str,
        query: &str,
        max_items: usize,
    ) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        let mut after: Option<String> = None;

        while posts.len() < max_items {
            let listing = self
                .fetch_search_page(forum, query, after.as_deref())
                .await?;

            if listing.data.children.is_empty() {
                break;
            }

            for child in listing.data.children {
                if child.kind != "t3" {
                    continue;
                }
                posts.push(post_from_data(forum, child.data));
                if posts.len() >= max_items {
                    break;
                }
            }

            after = listing.data.after;
            if after.is_none() {
                break;
            }
        }

        debug!(forum, count = posts.len(), "search pagination finished");
        Ok(posts)
    }

    async fn top_replies(&self, post: &Post, max: usize) -> Result<Vec<String>> {
        if max == 0 || post.num_replies == 0 {
            return Ok(Vec::new());
        }

        let token = self.bearer_token().await?;
        self.throttle.acquire().await;

        let url = format!("{OAUTH_BASE_URL}/r/{}/comments/{}", post.forum, post.id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .query(&[("depth", "1"), ("raw_json", "1")])
            .query(&[("limit", max as u64)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PulseError::ApiError(format!(
                "comment fetch for {} failed: {status}",
                post.id
            )));
        }

        // The comments endpoint returns a two-element array: the post
        // listing, then its top-level comments.
        let (_, comments): (Listing<PostData>, Listing<CommentData>) =
            response.json().await?;

        Ok(comments
            .data
            .children
            .into_iter()
            .filter(|c| c.kind == "t1")
            .map(|c| c.data.body)
            .filter(|body| is_substantive(body))
            .take(max)
            .collect())
    }
}

fn post_from_data(forum: &str, data: PostData) -> Post {
    Post {
        id: data.id,
        forum: forum.to_string(),
        title: data.title,
        body: data.selftext,
        created_utc: DateTime::from_timestamp(data.created_utc as i64, 0)
            .unwrap_or_else(Utc::now),
        num_replies: data.num_comments,
    }
}

/// Removed/deleted placeholders must not reach the scorer
fn is_substantive(body: &str) -> bool {
    let trimmed = body.trim();
    !trimmed.is_empty() && trimmed != "[removed]" && trimmed != "[deleted]"
}
