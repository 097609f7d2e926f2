//! Test helpers for client-core integration tests.
//!
//! - Client config pointed at a wiremock server
//! - Canned pricing responses
//! - Polling for listener-driven view changes

use client_core::component::PricerComponent;
use client_core::config::{ApiConfig, ClientConfig};
use client_core::identity::IdentityProvider;
use client_core::view::PageView;

use models::UserProfile;

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::MockServer;

pub fn config_for(server: &MockServer, require_token: bool) -> ClientConfig {
    ClientConfig {
        version: 1,
        api: ApiConfig {
            base_url: server.uri(),
            require_token,
            request_timeout_secs: 5,
            ..ApiConfig::default()
        },
    }
}

pub fn ada() -> UserProfile {
    UserProfile::new("Ada Lovelace", "ada@example.com")
}

pub fn price_body(predicted_price: f64) -> Value {
    json!({
        "predictedPrice": predicted_price,
        "confidenceScore": 0.873,
        "marketTrend": "neutral",
        "supplyLevel": "moderate",
        "priceTrend": "stable",
        "averageSalePrice": 11.0,
        "averageActivePrice": 14.0,
        "recentSales": [
            {"title": "2020 Prizm Herbert", "price": 11.0, "condition": "PSA 10", "date": "2024-05-01"}
        ],
        "activeListings": []
    })
}

/// Poll the component view until `predicate` holds or two seconds pass.
pub async fn wait_for_view<P, F>(component: &PricerComponent<P>, predicate: F) -> PageView
where
    P: IdentityProvider + 'static,
    F: Fn(&PageView) -> bool,
{
    for _ in 0..200 {
        let view = component.view().await;
        if predicate(&view) {
            return view;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("view never reached the expected state");
}
