use pricing_server::config::ServerConfig;
use pricing_server::{AppState, serve};

use market_data::{SEARCH_PATH, TOKEN_PATH};

use std::collections::HashMap;

use serde_json::{Value, json};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SECRET: &str = "integration-secret";

/// Server wired to mock marketplace and Google endpoints. Returns its base URL.
pub async fn start_server(upstream: &MockServer, require_auth: bool) -> String {
    let vars: HashMap<&str, String> = HashMap::from([
        ("BIND_ADDR", String::from("127.0.0.1:0")),
        ("EBAY_APP_ID", String::from("app")),
        ("EBAY_CERT_ID", String::from("cert")),
        ("EBAY_API_BASE", upstream.uri()),
        ("SECRET_KEY", String::from(SECRET)),
        ("REQUIRE_AUTH", require_auth.to_string()),
        ("GOOGLE_CLIENT_ID", String::from("google-client")),
        ("GOOGLE_CLIENT_SECRET", String::from("google-secret")),
        ("GOOGLE_AUTH_URL", format!("{}/o/oauth2/v2/auth", upstream.uri())),
        ("GOOGLE_TOKEN_URL", format!("{}/google/token", upstream.uri())),
        ("GOOGLE_USERINFO_URL", format!("{}/google/userinfo", upstream.uri())),
    ]);
    let config = ServerConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();

    let listener = TcpListener::bind(config.bind_addr).await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let state = AppState::from_config(config).unwrap();
    tokio::spawn(serve(listener, state));

    base_url
}

pub async fn mount_marketplace(upstream: &MockServer, sold: Value, active: Value) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "app-token", "expires_in": 7200})),
        )
        .mount(upstream)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(wiremock::matchers::query_param("sort", "-endDate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sold))
        .mount(upstream)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(wiremock::matchers::query_param("sort", "price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(active))
        .mount(upstream)
        .await;
}

pub fn summaries(items: &[(&str, &str)]) -> Value {
    let summaries: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(i, (title, price))| {
            json!({
                "itemId": format!("v1|{}|0", 500 + i),
                "title": title,
                "price": {"value": price, "currency": "USD"},
                "condition": "Ungraded",
                "buyingOptions": ["FIXED_PRICE"],
                "itemEndDate": "2024-06-01T10:00:00.000Z"
            })
        })
        .collect();
    json!({ "itemSummaries": summaries })
}

pub fn card_body() -> Value {
    json!({
        "brand": "Panini",
        "setName": "Prizm",
        "year": 2020,
        "condition": "Ungraded",
        "playerName": "Justin Herbert",
        "cardNumber": "325",
        "cardVariation": ""
    })
}
