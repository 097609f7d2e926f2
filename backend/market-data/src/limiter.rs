//! Outbound call limiter shared by every marketplace request.

use crate::error::MarketDataError;

use std::num::NonZeroU32;
use std::sync::Arc;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

#[derive(Debug, Clone)]
pub struct CallLimiter {
    inner: Arc<DirectLimiter>,
}

impl CallLimiter {
    #[track_caller]
    pub fn per_second(calls: u32) -> Result<Self, MarketDataError> {
        let calls = NonZeroU32::new(calls)
            .ok_or_else(|| MarketDataError::config("calls_per_second must be at least 1"))?;

        Ok(Self {
            inner: Arc::new(RateLimiter::direct(Quota::per_second(calls))),
        })
    }

    /// Wait for a slot.
    pub async fn acquire(&self) {
        self.inner.until_ready().await;
    }
}
