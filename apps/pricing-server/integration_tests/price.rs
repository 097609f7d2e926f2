use crate::helpers::{SECRET, card_body, mount_marketplace, start_server, summaries};

use pricing_server::auth::token::{Claims, encode};
use pricing_server::error::INVALID_CREDENTIALS;

use common::RedactedToken;
use market_data::SEARCH_PATH;
use models::PriceResponse;

use chrono::Duration;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn bearer() -> String {
    let claims = Claims::new("ada@example.com", "Ada", Duration::minutes(30));
    encode(&claims, &RedactedToken::new(SECRET))
        .unwrap()
        .bearer_header()
}

/// **VALUE**: Verifies the full request path: auth, marketplace searches, filtering and
/// the camelCase response the form renders.
///
/// **WHY THIS MATTERS**: This is the one endpoint the client calls. Field names, counts
/// and the prediction all have to line up with what the renderer reads.
///
/// **BUG THIS CATCHES**: Would catch snake_case leaking into the response, filtered items
/// being echoed back, or the search query losing the card number.
#[tokio::test]
async fn given_signed_in_request_when_pricing_then_returns_filtered_valuation() {
    // GIVEN: Two real sales plus a lot, one listing
    let upstream = MockServer::start().await;
    mount_marketplace(
        &upstream,
        summaries(&[
            ("2020 Prizm Herbert #325", "10.00"),
            ("2020 Prizm Herbert #325 RC", "12.00"),
            ("Prizm lot of 10", "40.00"),
        ]),
        summaries(&[("Herbert Prizm #325 Rookie", "15.00")]),
    )
    .await;
    let base_url = start_server(&upstream, true).await;

    // WHEN
    let response = reqwest::Client::new()
        .post(format!("{base_url}/api/price"))
        .header("authorization", bearer())
        .json(&card_body())
        .send()
        .await
        .unwrap();

    // THEN
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(body.get("predictedPrice").is_some());
    assert!(body.get("predicted_price").is_none());

    let priced: PriceResponse = serde_json::from_value(body).unwrap();
    assert_eq!(priced.recent_sales_count, Some(2));
    assert_eq!(priced.active_listings_count, Some(1));
    assert_eq!(priced.recent_sales.len(), 2);
    assert_eq!(priced.predicted_price, Some(12.83));
    assert_eq!(priced.market_trend.as_deref(), Some("neutral"));
    assert_eq!(
        priced.recent_sales[0].url.as_deref(),
        Some("https://www.ebay.com/itm/500")
    );

    // AND: The search text carried every populated field
    let requests = upstream.received_requests().await.unwrap();
    let search = requests
        .iter()
        .find(|request| request.url.path() == SEARCH_PATH)
        .unwrap();
    let q = search
        .url
        .query_pairs()
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned())
        .unwrap();
    assert_eq!(q, "Panini Prizm 2020 Justin Herbert #325");
}

/// **VALUE**: Verifies missing or invalid tokens get 401 with the JSON error body.
///
/// **WHY THIS MATTERS**: 401 is the client's signal to clear the session and reload.
///
/// **BUG THIS CATCHES**: Would catch the marketplace being called before auth, or a
/// non-401 status for a bad token.
#[tokio::test]
async fn given_missing_or_bad_token_when_pricing_then_unauthorized() {
    // GIVEN: Any marketplace call would be a failure
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&upstream)
        .await;
    let base_url = start_server(&upstream, true).await;
    let client = reqwest::Client::new();

    for auth in [None, Some("Bearer not.a.jwt")] {
        // WHEN
        let mut request = client.post(format!("{base_url}/api/price")).json(&card_body());
        if let Some(auth) = auth {
            request = request.header("authorization", auth);
        }
        let response = request.send().await.unwrap();

        // THEN
        assert_eq!(response.status(), 401);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "error": INVALID_CREDENTIALS }));
    }
}

/// **VALUE**: Verifies required fields are checked before any marketplace traffic.
///
/// **BUG THIS CATCHES**: Would catch a blank brand reaching the marketplace as a
/// nonsense search.
#[tokio::test]
async fn given_missing_year_when_pricing_then_bad_request() {
    let upstream = MockServer::start().await;
    let base_url = start_server(&upstream, false).await;

    let response = reqwest::Client::new()
        .post(format!("{base_url}/api/price"))
        .json(&json!({"brand": "Panini", "setName": "Prizm", "year": null}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "year must be an integer");
}

#[tokio::test]
async fn given_non_json_body_when_pricing_then_bad_request() {
    let upstream = MockServer::start().await;
    let base_url = start_server(&upstream, false).await;

    let response = reqwest::Client::new()
        .post(format!("{base_url}/api/price"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

/// **VALUE**: Verifies a marketplace outage is a 502, not a 401 or 500.
///
/// **WHY THIS MATTERS**: The client must keep the session on upstream failures and show
/// the generic error instead of forcing a sign-in.
///
/// **BUG THIS CATCHES**: Would catch upstream errors mapped to a status the client reads
/// as session expiry.
#[tokio::test]
async fn given_marketplace_rejects_when_pricing_then_bad_gateway() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(market_data::TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "app-token",
            "expires_in": 7200
        })))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad filter"))
        .mount(&upstream)
        .await;
    let base_url = start_server(&upstream, false).await;

    let response = reqwest::Client::new()
        .post(format!("{base_url}/api/price"))
        .json(&card_body())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 502);
}

#[tokio::test]
async fn given_running_server_when_checking_health_then_ok() {
    let upstream = MockServer::start().await;
    let base_url = start_server(&upstream, true).await;

    let body: Value = reqwest::get(format!("{base_url}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body, json!({ "status": "ok" }));
}
