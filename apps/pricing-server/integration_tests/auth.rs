use crate::helpers::{SECRET, start_server};

use pricing_server::auth::token::decode;

use common::RedactedToken;
use models::UserProfile;

use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the login endpoint points at the configured consent page with the
/// client id, scopes and redirect.
///
/// **BUG THIS CATCHES**: Would catch unencoded scopes or a missing redirect URI, both of
/// which make the provider reject the popup.
#[tokio::test]
async fn given_server_when_requesting_login_then_returns_auth_url() {
    let upstream = MockServer::start().await;
    let base_url = start_server(&upstream, true).await;

    let body: Value = reqwest::get(format!("{base_url}/login/google"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let auth_url = url::Url::parse(body["auth_url"].as_str().unwrap()).unwrap();
    assert_eq!(auth_url.path(), "/o/oauth2/v2/auth");
    let params: std::collections::HashMap<_, _> = auth_url.query_pairs().into_owned().collect();
    assert_eq!(params["client_id"], "google-client");
    assert_eq!(params["response_type"], "code");
    assert_eq!(params["scope"], "openid email profile");
    assert_eq!(params["access_type"], "offline");
    assert_eq!(params["redirect_uri"], "http://localhost:8000/auth/callback");
}

/// **VALUE**: Verifies the callback exchanges the code, reads the profile and issues a
/// token that the price endpoint accepts.
///
/// **WHY THIS MATTERS**: This is the token the client persists. Its claims must identify
/// the user and its shape must match what the client decodes.
///
/// **BUG THIS CATCHES**: Would catch the Google access token being returned instead of
/// our own, or the user record missing from the response.
#[tokio::test]
async fn given_valid_code_when_calling_back_then_issues_bearer_token() {
    // GIVEN: Google accepts the code and returns a profile
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/google/token"))
        .and(body_string_contains("code=auth-code"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("client_secret=google-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "google-access",
            "token_type": "Bearer",
            "expires_in": 3599
        })))
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/google/userinfo"))
        .and(header("authorization", "Bearer google-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email": "ada@example.com",
            "name": "Ada Lovelace"
        })))
        .expect(1)
        .mount(&upstream)
        .await;
    let base_url = start_server(&upstream, true).await;

    // WHEN
    let body: Value = reqwest::get(format!("{base_url}/auth/callback?code=auth-code"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // THEN
    assert_eq!(body["token_type"], "bearer");
    let user: UserProfile = serde_json::from_value(body["user"].clone()).unwrap();
    assert_eq!(user, UserProfile::new("Ada Lovelace", "ada@example.com"));
    assert_eq!(body["user"]["displayName"], "Ada Lovelace");

    let token = body["access_token"].as_str().unwrap();
    assert_ne!(token, "google-access");
    let claims = decode(token, &RedactedToken::new(SECRET)).unwrap();
    assert_eq!(claims.sub, "ada@example.com");
    assert_eq!(claims.name, "Ada Lovelace");
}

/// **VALUE**: Verifies a provider error is reported as 400 with the provider's code.
///
/// **BUG THIS CATCHES**: Would catch the error reply being treated as success and a
/// token issued for nobody.
#[tokio::test]
async fn given_rejected_code_when_calling_back_then_bad_request() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/google/token"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "invalid_grant"})),
        )
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/google/userinfo"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;
    let base_url = start_server(&upstream, true).await;

    let response = reqwest::get(format!("{base_url}/auth/callback?code=stale"))
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "invalid_grant");
}

#[tokio::test]
async fn given_no_code_when_calling_back_then_bad_request() {
    let upstream = MockServer::start().await;
    let base_url = start_server(&upstream, true).await;

    let response = reqwest::get(format!("{base_url}/auth/callback"))
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}
