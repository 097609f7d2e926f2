use crate::auth::token::{Claims, encode};
use crate::config::ACCESS_TOKEN_MINUTES;
use crate::error::ServerError;
use crate::state::SharedState;

use models::UserProfile;

use axum::Json;
use axum::extract::{Query, State};
use chrono::Duration;
use serde::{Deserialize, Serialize};

pub const TOKEN_TYPE: &str = "bearer";

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub auth_url: String,
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserProfile,
}

/// GET /login/google
pub async fn login_google(
    State(state): State<SharedState>,
) -> Result<Json<LoginResponse>, ServerError> {
    Ok(Json(LoginResponse {
        auth_url: state.google.authorization_url()?,
    }))
}

/// GET /auth/callback?code=...
///
/// Exchanges the code with Google and issues a 30 minute access token.
pub async fn auth_callback(
    State(state): State<SharedState>,
    Query(params): Query<CallbackParams>,
) -> Result<Json<TokenResponse>, ServerError> {
    let code = params
        .code
        .filter(|code| !code.trim().is_empty())
        .ok_or_else(|| ServerError::bad_request("Missing authorization code"))?;

    let user = state.google.exchange(&code).await?;
    let claims = Claims::new(
        user.email.clone(),
        user.display_name.clone(),
        Duration::minutes(ACCESS_TOKEN_MINUTES),
    );
    let access_token = encode(&claims, &state.secret_key)?;

    Ok(Json(TokenResponse {
        access_token: access_token.as_str().to_string(),
        token_type: TOKEN_TYPE.to_string(),
        user,
    }))
}
