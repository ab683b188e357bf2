//! Shared request throttle

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::time::Duration;

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Fixed-interval gate shared by everything that talks to the discussion
/// source.
///
/// The rate budget is account-level, not per-forum, so there is exactly one
/// gate: the aggregator waits on it between items and the Reddit client
/// waits on it before every HTTP request. A concurrent-forum implementation
/// can keep sharing the same quota.
pub struct Throttle {
    limiter: Option<DirectLimiter>,
}

impl Throttle {
    /// Create a gate that releases one permit per `interval`.
    ///
    /// A zero interval disables gating entirely.
    pub fn with_interval(interval: Duration) -> Self {
        let limiter = Quota::with_period(interval).map(RateLimiter::direct);
        Self { limiter }
    }

    /// Wait until the next permit is available.
    pub async fn acquire(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}
