use crate::config::ApiConfig;
use crate::error::PricingClientError;
use crate::field_normalizer::normalize_json;

use common::RedactedToken;
use models::{CardQuery, PriceResponse};

use log::{debug, warn};
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use url::Url;

/// HTTP client for `POST /api/price`.
///
/// One call is one request: no retry, no cancellation.
#[derive(Clone)]
pub struct PricingClient {
    endpoint: Url,
    client: Client,
}

impl PricingClient {
    pub fn new(config: &ApiConfig) -> Result<Self, PricingClientError> {
        let endpoint = Url::parse(&config.base_url)?.join(&config.price_endpoint)?;
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { endpoint, client })
    }

    fn prepare_request(
        &self,
        request: reqwest::RequestBuilder,
        token: Option<&RedactedToken>,
    ) -> reqwest::RequestBuilder {
        let mut request = request;
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, token.bearer_header());
        }
        request
    }

    /// Submit a query and decode the valuation.
    ///
    /// # Errors
    /// - [`PricingClientError::Unauthorized`] on HTTP 401
    /// - [`PricingClientError::Server`] on any other non-success status
    /// - [`PricingClientError::Network`] when no response arrived
    /// - [`PricingClientError::Json`] when the body is not JSON
    pub async fn fetch_price(
        &self,
        query: &CardQuery,
        token: Option<&RedactedToken>,
    ) -> Result<PriceResponse, PricingClientError> {
        debug!(
            "POST {} (authorized: {})",
            self.endpoint,
            token.is_some()
        );

        let response = self
            .prepare_request(self.client.post(self.endpoint.clone()), token)
            .json(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error = PricingClientError::from_http_response(
                status.as_u16(),
                response.text().await.unwrap_or_default(),
            );
            warn!("Pricing request failed ({}): {}", error.error_category(), error);
            return Err(error);
        }

        let json: Value = response.json().await?;
        let normalized = normalize_json(json);
        let price: PriceResponse = serde_json::from_value(normalized)?;

        Ok(price)
    }
}
