//! eBay Browse API client for sold and active card listings.
//!
//! - [`token::TokenCache`]: client-credentials OAuth token, refreshed once per expiry
//! - [`limiter::CallLimiter`]: shared outbound rate limit
//! - [`client::EbayClient`]: sold and active searches, retried on transient failures
//! - [`items`]: tolerant decoding of item summaries into [`models::SoldItem`] and
//!   [`models::ActiveItem`]

pub mod client;
pub mod config;
pub mod error;
pub mod items;
pub mod limiter;
pub mod search_filter;
pub mod token;

#[cfg(test)]
mod tests;

pub use client::EbayClient;
pub use config::MarketConfig;
pub use error::MarketDataError;

use const_format::concatcp;

pub const EBAY_API_BASE: &str = "https://api.ebay.com";
pub const TOKEN_PATH: &str = "/identity/v1/oauth2/token";
pub const SEARCH_PATH: &str = "/buy/browse/v1/item_summary/search";
pub const OAUTH_SCOPE: &str = concatcp!(EBAY_API_BASE, "/oauth/api_scope");
pub const ITEM_URL_PREFIX: &str = "https://www.ebay.com/itm/";
pub const MARKETPLACE_HEADER: &str = "X-EBAY-C-MARKETPLACE-ID";
pub const DEFAULT_MARKETPLACE_ID: &str = "EBAY_US";
