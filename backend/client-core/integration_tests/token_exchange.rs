use client_core::error::IdentityError;
use client_core::identity::{AuthPopup, IdentityProvider, TokenExchangeProvider};

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Popup that "completes" the provider page with a fixed code.
struct ScriptedPopup {
    code: Option<&'static str>,
}

impl AuthPopup for ScriptedPopup {
    async fn authorize(&self, auth_url: &str) -> Result<String, IdentityError> {
        assert!(auth_url.starts_with("https://accounts.example.com/"));
        self.code
            .map(String::from)
            .ok_or_else(|| IdentityError::popup_closed("user closed the popup"))
    }
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/login/google"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "auth_url": "https://accounts.example.com/o/oauth2/auth?client_id=abc"
        })))
        .mount(server)
        .await;
}

/// **VALUE**: Verifies the three-step code exchange yields a token and publishes the user.
///
/// **WHY THIS MATTERS**: This is how the token-based page signs in; every authorized
/// pricing request depends on the token it returns.
///
/// **BUG THIS CATCHES**: Would catch a missing `code` query parameter, a dropped token, or
/// a provider that never emits the signed-in user.
#[tokio::test]
async fn given_successful_popup_when_signing_in_then_token_returned_and_user_emitted() {
    // GIVEN: Login and callback endpoints
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/auth/callback"))
        .and(query_param("code", "code-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "jwt-xyz",
            "token_type": "bearer",
            "user": {"displayName": "Ada Lovelace", "email": "ada@example.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let provider = TokenExchangeProvider::new(
        &server.uri(),
        ScriptedPopup {
            code: Some("code-123"),
        },
    )
    .unwrap();
    let state_rx = provider.subscribe();

    // WHEN: Signing in
    let session = provider.sign_in().await.unwrap();

    // THEN: Token and user
    assert_eq!(session.token.unwrap().as_str(), "jwt-xyz");
    assert_eq!(session.user.email, "ada@example.com");
    assert_eq!(
        state_rx.borrow().as_ref().map(|u| u.display_name.as_str()),
        Some("Ada Lovelace")
    );
}

#[tokio::test]
async fn given_closed_popup_when_signing_in_then_error_and_no_emission() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    let provider = TokenExchangeProvider::new(&server.uri(), ScriptedPopup { code: None }).unwrap();
    let state_rx = provider.subscribe();

    let result = provider.sign_in().await;

    assert!(matches!(result, Err(IdentityError::PopupClosed { .. })));
    assert!(state_rx.borrow().is_none());
}

#[tokio::test]
async fn given_rejected_code_when_signing_in_then_returns_token_exchange_error() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/auth/callback"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Could not validate credentials"))
        .mount(&server)
        .await;
    let provider = TokenExchangeProvider::new(
        &server.uri(),
        ScriptedPopup {
            code: Some("bad"),
        },
    )
    .unwrap();

    let result = provider.sign_in().await;

    match result {
        Err(IdentityError::TokenExchange { status_code, .. }) => assert_eq!(status_code.0, 400),
        other => panic!("expected token exchange error, got {:?}", other.map(|_| ())),
    }
}

/// **VALUE**: Verifies a base URL with a path prefix keeps that prefix for both calls.
///
/// **WHY THIS MATTERS**: The pricing server may sit behind a reverse proxy under a
/// sub-path. Relative joins against `http://host/pricer` would drop `pricer`.
///
/// **BUG THIS CATCHES**: Would catch endpoints resolved against the host root instead of
/// the configured prefix.
#[tokio::test]
async fn given_base_url_with_path_prefix_when_signing_in_then_endpoints_keep_prefix() {
    // GIVEN: Endpoints mounted only under /pricer
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pricer/login/google"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "auth_url": "https://accounts.example.com/o/oauth2/auth?client_id=abc"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pricer/auth/callback"))
        .and(query_param("code", "code-456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "jwt-prefixed",
            "token_type": "bearer",
            "user": {"displayName": "Ada Lovelace", "email": "ada@example.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let provider = TokenExchangeProvider::new(
        &format!("{}/pricer", server.uri()),
        ScriptedPopup {
            code: Some("code-456"),
        },
    )
    .unwrap();

    // WHEN: Signing in
    let session = provider.sign_in().await.unwrap();

    // THEN: Both calls went under the prefix
    assert_eq!(session.token.unwrap().as_str(), "jwt-prefixed");
}
