use crate::helpers::{APP_TOKEN, basic_header, client_for, config_for, mount_token, search_body, search_path};

use market_data::token::TokenCache;
use market_data::{MarketDataError, TOKEN_PATH};

use common::RedactedToken;

use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the client-credentials request shape.
///
/// **WHY THIS MATTERS**: The marketplace only accepts Basic auth with `app:cert` and a
/// form-encoded grant. Anything else is a 401 on every request.
///
/// **BUG THIS CATCHES**: Would catch a JSON body, a missing scope, or the cert id sent
/// in the clear instead of base64.
#[tokio::test]
async fn given_credentials_when_fetching_token_then_basic_auth_form_request() {
    // GIVEN: A strict token endpoint
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(header("authorization", basic_header().as_str()))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("scope=https%3A%2F%2Fapi.ebay.com%2Foauth%2Fapi_scope"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": APP_TOKEN,
            "expires_in": 7200
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let cache = TokenCache::new(
        reqwest::Client::new(),
        &config.api_base,
        &config.app_id,
        &config.cert_id,
    )
    .unwrap();

    // WHEN: Asking twice
    let first = cache.token().await.unwrap();
    let second = cache.token().await.unwrap();

    // THEN: One request, same token
    assert_eq!(first.as_str(), APP_TOKEN);
    assert_eq!(second, first);
}

/// **VALUE**: Verifies a token shorter-lived than the safety margin is refetched.
///
/// **BUG THIS CATCHES**: Would catch underflow on `expires_in - 3600` or a stale token
/// being served past its margin.
#[tokio::test]
async fn given_short_lived_token_when_asking_again_then_refetched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "short",
            "expires_in": 600
        })))
        .expect(2)
        .mount(&server)
        .await;

    let cache = TokenCache::new(
        reqwest::Client::new(),
        &server.uri(),
        "id",
        &RedactedToken::new("secret"),
    )
    .unwrap();

    cache.token().await.unwrap();
    cache.token().await.unwrap();
}

/// **VALUE**: Verifies a rejected credential surfaces as an auth error, not a retry loop.
///
/// **BUG THIS CATCHES**: Would catch token failures being retried until the time budget
/// runs out.
#[tokio::test]
async fn given_rejected_credentials_when_searching_then_auth_error() {
    // GIVEN: Token endpoint refuses
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN
    let result = client_for(&server).search_active("Prizm").await;

    // THEN
    match result {
        Err(MarketDataError::Auth {
            status_code,
            message,
            ..
        }) => {
            assert_eq!(status_code.0, 401);
            assert_eq!(message, "invalid_client");
        }
        other => panic!("expected auth error, got {other:?}"),
    }
}

/// **VALUE**: Verifies a search 401 drops the cached token and retries once with a
/// fresh one.
///
/// **WHY THIS MATTERS**: Application tokens can be revoked before their stated expiry.
///
/// **BUG THIS CATCHES**: Would catch a revoked token being reused until it ages out.
#[tokio::test]
async fn given_revoked_token_when_searching_then_refreshes_once() {
    // GIVEN: First search rejected, second accepted
    let server = MockServer::start().await;
    mount_token(&server, 2).await;
    Mock::given(method("GET"))
        .and(search_path())
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(search_path())
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&["10.00"])))
        .mount(&server)
        .await;

    // WHEN
    let items = client_for(&server).search_active("Prizm").await.unwrap();

    // THEN
    assert_eq!(items.len(), 1);
}
