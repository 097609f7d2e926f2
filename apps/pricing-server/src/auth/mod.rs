pub mod google;
pub mod token;

use crate::error::ServerError;

use common::RedactedToken;

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

pub use token::Claims;

const BEARER_PREFIX: &str = "Bearer ";

/// Validate the request's bearer token.
pub fn authenticate(headers: &HeaderMap, secret: &RedactedToken) -> Result<Claims, ServerError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(ServerError::unauthorized)?;

    token::decode(token, secret)
}
