use market_data::{EbayClient, MarketConfig, SEARCH_PATH, TOKEN_PATH};

use common::RedactedToken;

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const APP_ID: &str = "app-id";
pub const CERT_ID: &str = "cert-secret";
pub const APP_TOKEN: &str = "app-token";

pub fn config_for(server: &MockServer) -> MarketConfig {
    MarketConfig::new(APP_ID, RedactedToken::new(CERT_ID))
        .with_api_base(server.uri())
        .with_retry_max_elapsed(Duration::from_secs(3))
}

pub fn client_for(server: &MockServer) -> EbayClient {
    EbayClient::new(config_for(server)).unwrap()
}

pub fn basic_header() -> String {
    format!("Basic {}", STANDARD.encode(format!("{APP_ID}:{CERT_ID}")))
}

/// Token endpoint answering with a two-hour token, expected `times` calls.
pub async fn mount_token(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": APP_TOKEN,
            "expires_in": 7200,
            "token_type": "Application Access Token"
        })))
        .expect(times)
        .mount(server)
        .await;
}

pub fn search_body(prices: &[&str]) -> serde_json::Value {
    let items: Vec<_> = prices
        .iter()
        .enumerate()
        .map(|(i, price)| {
            json!({
                "itemId": format!("v1|{}|0", 100 + i),
                "title": format!("2020 Prizm Herbert #{i}"),
                "price": {"value": price, "currency": "USD"},
                "condition": "Ungraded",
                "buyingOptions": ["FIXED_PRICE"],
                "itemEndDate": "2024-06-01T10:00:00.000Z"
            })
        })
        .collect();
    json!({"total": items.len(), "itemSummaries": items})
}

pub fn search_path() -> wiremock::matchers::PathExactMatcher {
    path(SEARCH_PATH)
}
