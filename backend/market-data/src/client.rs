//! Marketplace search client.

use crate::config::MarketConfig;
use crate::error::MarketDataError;
use crate::items::{SearchResponse, active_items, sold_items};
use crate::limiter::CallLimiter;
use crate::search_filter::{ACTIVE_FILTER, ACTIVE_SORT, SOLD_SORT, sold_filter};
use crate::token::TokenCache;
use crate::{MARKETPLACE_HEADER, SEARCH_PATH};

use common::RedactedToken;
use models::{ActiveItem, SoldItem};

use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;
use chrono::Utc;
use log::{debug, info, warn};
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use tokio::time::sleep as TokioSleep;
use url::Url;

/// Sold and active item searches against the Browse API.
pub struct EbayClient {
    http: Client,
    search_url: Url,
    config: MarketConfig,
    tokens: TokenCache,
    limiter: CallLimiter,
}

impl EbayClient {
    pub fn new(config: MarketConfig) -> Result<Self, MarketDataError> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| MarketDataError::config(format!("Failed to build HTTP client: {e}")))?;

        let search_url = Url::parse(&config.api_base)?.join(SEARCH_PATH)?;
        let tokens = TokenCache::new(
            http.clone(),
            &config.api_base,
            &config.app_id,
            &config.cert_id,
        )?;
        let limiter = CallLimiter::per_second(config.calls_per_second)?;

        Ok(Self {
            http,
            search_url,
            config,
            tokens,
            limiter,
        })
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Sales inside the configured window, newest first.
    pub async fn search_sold(
        &self,
        query: &str,
        condition: &str,
    ) -> Result<Vec<SoldItem>, MarketDataError> {
        let now = Utc::now();
        let filter = sold_filter(now, self.config.sold_window_days, condition);
        debug!("Sold search '{query}' with filter {filter}");

        let response = self.search(query, &filter, SOLD_SORT).await?;
        let items = sold_items(response, now);
        info!("Sold search '{query}' returned {} usable items", items.len());
        Ok(items)
    }

    /// Buy-it-now and auction listings, cheapest first.
    pub async fn search_active(&self, query: &str) -> Result<Vec<ActiveItem>, MarketDataError> {
        let response = self.search(query, ACTIVE_FILTER, ACTIVE_SORT).await?;
        let items = active_items(response);
        info!("Active search '{query}' returned {} usable items", items.len());
        Ok(items)
    }

    async fn search(
        &self,
        query: &str,
        filter: &str,
        sort: &str,
    ) -> Result<SearchResponse, MarketDataError> {
        let mut backoff = ExponentialBackoff {
            max_elapsed_time: Some(self.config.retry_max_elapsed),
            ..Default::default()
        };

        let mut token_refreshed = false;

        loop {
            let error = match self.search_once(query, filter, sort).await {
                Ok(response) => return Ok(response),
                Err(error) => error,
            };

            let unauthorized = matches!(
                &error,
                MarketDataError::Api { status_code, .. } if status_code.is_unauthorized()
            );
            if unauthorized && !token_refreshed {
                // Token revoked before its expiry; fetch a new one once.
                info!("Marketplace rejected the cached token, refreshing");
                self.tokens.invalidate().await;
                token_refreshed = true;
                continue;
            }
            if !error.is_retryable() {
                return Err(error);
            }

            match backoff.next_backoff() {
                Some(duration) => {
                    warn!(
                        "Marketplace search failed ({}), retrying after {duration:?}",
                        error.error_category()
                    );
                    TokioSleep(duration).await;
                }
                None => return Err(error),
            }
        }
    }

    async fn search_once(
        &self,
        query: &str,
        filter: &str,
        sort: &str,
    ) -> Result<SearchResponse, MarketDataError> {
        let token = self.tokens.token().await?;
        self.limiter.acquire().await;

        let limit = self.config.max_results.to_string();
        let response = self
            .prepare_request(&token)
            .query(&[
                ("q", query),
                ("filter", filter),
                ("sort", sort),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::api(status.as_u16(), body));
        }

        Ok(response.json::<SearchResponse>().await?)
    }

    fn prepare_request(&self, token: &RedactedToken) -> reqwest::RequestBuilder {
        self.http
            .get(self.search_url.clone())
            .header(AUTHORIZATION, token.bearer_header())
            .header(MARKETPLACE_HEADER, &self.config.marketplace_id)
    }
}
