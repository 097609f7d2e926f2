use crate::error::MarketDataError;
use crate::{DEFAULT_MARKETPLACE_ID, EBAY_API_BASE};

use common::RedactedToken;

use std::time::Duration;

/// Two calls per second across all searches.
pub const DEFAULT_CALLS_PER_SECOND: u32 = 2;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_RETRY_MAX_ELAPSED: Duration = Duration::from_secs(10);

/// Marketplace credentials and request tuning.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    pub app_id: String,
    pub cert_id: RedactedToken,
    pub api_base: String,
    pub marketplace_id: String,
    /// Days of sold history to request.
    pub sold_window_days: u32,
    /// Page size for each search.
    pub max_results: u32,
    pub calls_per_second: u32,
    pub request_timeout: Duration,
    /// Total time budget for retrying one search.
    pub retry_max_elapsed: Duration,
}

impl MarketConfig {
    pub fn new(app_id: impl Into<String>, cert_id: RedactedToken) -> Self {
        Self {
            app_id: app_id.into(),
            cert_id,
            api_base: EBAY_API_BASE.to_string(),
            marketplace_id: DEFAULT_MARKETPLACE_ID.to_string(),
            sold_window_days: 90,
            max_results: 100,
            calls_per_second: DEFAULT_CALLS_PER_SECOND,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            retry_max_elapsed: DEFAULT_RETRY_MAX_ELAPSED,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_window(mut self, sold_window_days: u32, max_results: u32) -> Self {
        self.sold_window_days = sold_window_days;
        self.max_results = max_results;
        self
    }

    pub fn with_retry_max_elapsed(mut self, retry_max_elapsed: Duration) -> Self {
        self.retry_max_elapsed = retry_max_elapsed;
        self
    }

    #[track_caller]
    pub fn validate(&self) -> Result<(), MarketDataError> {
        if self.app_id.trim().is_empty() || self.cert_id.is_empty() {
            return Err(MarketDataError::config("EBAY_APP_ID and EBAY_CERT_ID are required"));
        }
        if self.calls_per_second == 0 {
            return Err(MarketDataError::config("calls_per_second must be at least 1"));
        }
        if self.max_results == 0 {
            return Err(MarketDataError::config("max_results must be at least 1"));
        }
        Ok(())
    }
}
