use crate::auth::authenticate;
use crate::auth::token::{Claims, decode, encode};
use crate::error::ServerError;

use common::RedactedToken;

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, HeaderValue};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Duration;

fn secret() -> RedactedToken {
    RedactedToken::new("test-secret")
}

/// **VALUE**: Verifies an issued token validates and carries the user identity.
///
/// **WHY THIS MATTERS**: The client stores this token and sends it with every price
/// request; if it does not validate, every signed-in user gets a 401 and a reload loop.
///
/// **BUG THIS CATCHES**: Would catch signing and verification disagreeing on the signing
/// input or the base64 alphabet.
#[test]
fn given_issued_token_when_decoding_then_claims_round_trip() {
    // GIVEN
    let claims = Claims::new("ada@example.com", "Ada", Duration::minutes(30));
    let token = encode(&claims, &secret()).unwrap();

    // WHEN
    let decoded = decode(token.as_str(), &secret()).unwrap();

    // THEN
    assert_eq!(decoded, claims);
    assert_eq!(token.as_str().split('.').count(), 3);
}

/// **VALUE**: Verifies a token signed with another key is rejected.
///
/// **BUG THIS CATCHES**: Would catch the signature check being skipped.
#[test]
fn given_wrong_secret_when_decoding_then_unauthorized() {
    let claims = Claims::new("ada@example.com", "Ada", Duration::minutes(30));
    let token = encode(&claims, &RedactedToken::new("other")).unwrap();

    let result = decode(token.as_str(), &secret());

    assert!(matches!(result, Err(ServerError::Unauthorized { .. })));
}

#[test]
fn given_expired_token_when_decoding_then_unauthorized() {
    let claims = Claims::new("ada@example.com", "Ada", Duration::minutes(-1));
    let token = encode(&claims, &secret()).unwrap();

    assert!(matches!(
        decode(token.as_str(), &secret()),
        Err(ServerError::Unauthorized { .. })
    ));
}

/// **VALUE**: Verifies tampering with the claims invalidates the signature.
///
/// **BUG THIS CATCHES**: Would catch verifying the signature over re-encoded claims
/// instead of the received bytes.
#[test]
fn given_tampered_payload_when_decoding_then_unauthorized() {
    // GIVEN: A valid token whose payload is swapped for another user
    let token = encode(
        &Claims::new("ada@example.com", "Ada", Duration::minutes(30)),
        &secret(),
    )
    .unwrap();
    let parts: Vec<&str> = token.as_str().split('.').collect();
    let forged = URL_SAFE_NO_PAD.encode(
        serde_json::to_vec(&Claims::new("eve@example.com", "Eve", Duration::minutes(30)))
            .unwrap(),
    );
    let tampered = format!("{}.{}.{}", parts[0], forged, parts[2]);

    // WHEN / THEN
    assert!(decode(&tampered, &secret()).is_err());
}

#[test]
fn given_garbage_when_decoding_then_unauthorized() {
    for token in ["", "abc", "a.b", "a.b.c.d", "!!.??.**"] {
        assert!(
            matches!(decode(token, &secret()), Err(ServerError::Unauthorized { .. })),
            "token {token:?} should be rejected"
        );
    }
}

#[test]
fn given_headers_when_authenticating_then_requires_bearer_scheme() {
    let token = encode(
        &Claims::new("ada@example.com", "Ada", Duration::minutes(30)),
        &secret(),
    )
    .unwrap();

    let mut headers = HeaderMap::new();
    assert!(authenticate(&headers, &secret()).is_err());

    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Basic {}", token.as_str())).unwrap(),
    );
    assert!(authenticate(&headers, &secret()).is_err());

    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&token.bearer_header()).unwrap(),
    );
    assert_eq!(authenticate(&headers, &secret()).unwrap().sub, "ada@example.com");
}
