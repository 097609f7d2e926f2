//! HS256 access tokens.
//!
//! Compact JWS: `base64url(header).base64url(claims).base64url(hmac)`, no padding.

use crate::error::ServerError;

use common::RedactedToken;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// Access token claims. `sub` is the user's email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub name: String,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

impl Claims {
    pub fn new(email: impl Into<String>, name: impl Into<String>, lifetime: Duration) -> Self {
        Self {
            sub: email.into(),
            name: name.into(),
            exp: (Utc::now() + lifetime).timestamp(),
        }
    }
}

fn mac(secret: &RedactedToken) -> Result<HmacSha256, ServerError> {
    HmacSha256::new_from_slice(secret.as_str().as_bytes())
        .map_err(|e| ServerError::server(format!("Invalid signing key: {e}")))
}

fn encode_json<T: Serialize>(value: &T) -> Result<String, ServerError> {
    let json = serde_json::to_vec(value)
        .map_err(|e| ServerError::server(format!("Failed to encode token: {e}")))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

pub fn encode(claims: &Claims, secret: &RedactedToken) -> Result<RedactedToken, ServerError> {
    let header = Header {
        alg: ALGORITHM.to_string(),
        typ: String::from("JWT"),
    };
    let signing_input = format!("{}.{}", encode_json(&header)?, encode_json(claims)?);

    let mut mac = mac(secret)?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(RedactedToken::new(format!("{signing_input}.{signature}")))
}

/// Verify signature, algorithm and expiry. Every failure is the same
/// [`ServerError::Unauthorized`].
pub fn decode(token: &str, secret: &RedactedToken) -> Result<Claims, ServerError> {
    let mut parts = token.split('.');
    let (Some(header), Some(payload), Some(signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ServerError::unauthorized());
    };

    let signature = URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| ServerError::unauthorized())?;
    let mut mac = mac(secret)?;
    mac.update(header.as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| ServerError::unauthorized())?;

    let header: Header = decode_json(header)?;
    if header.alg != ALGORITHM {
        return Err(ServerError::unauthorized());
    }

    let claims: Claims = decode_json(payload)?;
    if claims.sub.is_empty() || claims.exp <= Utc::now().timestamp() {
        return Err(ServerError::unauthorized());
    }

    Ok(claims)
}

fn decode_json<T: for<'de> Deserialize<'de>>(part: &str) -> Result<T, ServerError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(part)
        .map_err(|_| ServerError::unauthorized())?;
    serde_json::from_slice(&bytes).map_err(|_| ServerError::unauthorized())
}
