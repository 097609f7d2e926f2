//! Google authorization-code exchange.

use crate::config::GoogleConfig;
use crate::error::ServerError;

use models::UserProfile;

use log::{debug, info};
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use url::Url;

const SCOPE: &str = "openid email profile";

#[derive(Debug, Deserialize)]
struct TokenReply {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

pub struct GoogleOAuth {
    config: GoogleConfig,
    http: Client,
}

impl GoogleOAuth {
    pub fn new(config: GoogleConfig, http: Client) -> Self {
        Self { config, http }
    }

    /// Provider consent page for this client.
    pub fn authorization_url(&self) -> Result<String, ServerError> {
        let url = Url::parse_with_params(
            &self.config.auth_url,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("response_type", "code"),
                ("scope", SCOPE),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("access_type", "offline"),
            ],
        )
        .map_err(|e| ServerError::config(format!("Invalid Google auth URL: {e}")))?;

        Ok(url.into())
    }

    /// Trade an authorization code for the user's profile.
    pub async fn exchange(&self, code: &str) -> Result<UserProfile, ServerError> {
        let reply: TokenReply = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ServerError::oauth(format!("Token request failed: {e}")))?
            .json()
            .await
            .map_err(|e| ServerError::oauth(format!("Token response unreadable: {e}")))?;

        if let Some(error) = reply.error {
            debug!("Google token error: {:?}", reply.error_description);
            return Err(ServerError::oauth(error));
        }
        let access_token = reply
            .access_token
            .ok_or_else(|| ServerError::oauth("Token response missing access_token"))?;

        let info: UserInfo = self
            .http
            .get(&self.config.userinfo_url)
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .send()
            .await
            .map_err(|e| ServerError::oauth(format!("User info request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ServerError::oauth(format!("User info rejected: {e}")))?
            .json()
            .await
            .map_err(|e| ServerError::oauth(format!("User info unreadable: {e}")))?;

        let email = info
            .email
            .filter(|email| !email.is_empty())
            .ok_or_else(|| ServerError::oauth("User info missing email"))?;
        let name = info.name.unwrap_or_else(|| email.clone());

        info!("Google sign-in for {email}");
        Ok(UserProfile::new(name, email))
    }
}
