use client_core::config::ApiConfig;
use client_core::error::PricingClientError;
use client_core::pricing_client::PricingClient;

use common::RedactedToken;
use models::CardQueryBuilder;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PricingClient {
    PricingClient::new(&ApiConfig {
        base_url: server.uri(),
        request_timeout_secs: 5,
        ..ApiConfig::default()
    })
    .unwrap()
}

/// **VALUE**: Verifies one POST with the full camelCase body and the bearer header.
///
/// **WHY THIS MATTERS**: This is the only request the form sends. A missing field or
/// header means the server prices the wrong card or answers 401.
///
/// **BUG THIS CATCHES**: Would catch body-shape drift, a lost `Authorization` header, or
/// duplicate requests (the mock expects exactly one).
#[tokio::test]
async fn given_query_and_token_when_fetching_price_then_posts_once_with_bearer() {
    // GIVEN: A server expecting the canonical body
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/price"))
        .and(header("authorization", "Bearer jwt-abc"))
        .and(body_json(json!({
            "brand": "Panini",
            "setName": "Prizm",
            "year": 2020,
            "condition": "PSA 10",
            "playerName": "Justin Herbert",
            "cardNumber": "325",
            "cardVariation": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"predictedPrice": 12.5})))
        .expect(1)
        .mount(&server)
        .await;

    let query = CardQueryBuilder::default()
        .with_brand("Panini")
        .with_set_name("Prizm")
        .with_year_input("2020")
        .with_condition("PSA 10")
        .with_player_name("Justin Herbert")
        .with_card_number("325")
        .with_card_variation("")
        .build();

    // WHEN: Fetching
    let response = client_for(&server)
        .fetch_price(&query, Some(&RedactedToken::new("jwt-abc")))
        .await
        .unwrap();

    // THEN: Decoded
    assert_eq!(response.predicted_price, Some(12.5));
}

/// **VALUE**: Verifies the nested snake_case response shape decodes to the flat model.
///
/// **WHY THIS MATTERS**: Older backends still answer this way.
///
/// **BUG THIS CATCHES**: Would catch if the client stops normalizing before decoding.
#[tokio::test]
async fn given_nested_snake_case_response_when_fetching_then_fields_are_flattened() {
    // GIVEN: A legacy-shaped response
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predicted_price": 40.0,
            "confidence_score": 0.5,
            "market_analysis": {"market_trend": "bearish", "avg_sale_price": 41.0},
            "recent_sales": [],
            "active_listings": [{"title": "x", "price": "39.5", "listing_type": "auction"}]
        })))
        .mount(&server)
        .await;

    // WHEN: Fetching
    let response = client_for(&server)
        .fetch_price(&Default::default(), None)
        .await
        .unwrap();

    // THEN: Flattened and decoded
    assert_eq!(response.market_trend.as_deref(), Some("bearish"));
    assert_eq!(response.average_sale_price, Some(41.0));
    assert_eq!(response.active_listings[0].price, Some(39.5));
}

#[tokio::test]
async fn given_401_when_fetching_then_returns_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid token"))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .fetch_price(&Default::default(), Some(&RedactedToken::new("stale")))
        .await;

    let error = result.unwrap_err();
    assert!(error.is_unauthorized());
    assert_eq!(error.error_category(), "unauthorized");
}

#[tokio::test]
async fn given_500_when_fetching_then_returns_server_error_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("eBay down"))
        .mount(&server)
        .await;

    let result = client_for(&server).fetch_price(&Default::default(), None).await;

    match result {
        Err(PricingClientError::Server {
            status_code,
            message,
            ..
        }) => {
            assert_eq!(status_code.0, 500);
            assert_eq!(message, "eBay down");
        }
        other => panic!("expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn given_non_json_body_when_fetching_then_returns_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server).fetch_price(&Default::default(), None).await;

    assert!(matches!(result, Err(PricingClientError::Json { .. })));
}
