//! Client-credentials OAuth token with a refresh margin.

use crate::error::MarketDataError;
use crate::{OAUTH_SCOPE, TOKEN_PATH};

use common::RedactedToken;

use std::time::{Duration, Instant};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::{debug, info};
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use tokio::sync::Mutex;
use url::Url;

/// Tokens are treated as expired this long before the marketplace says so.
pub const EXPIRY_MARGIN_SECS: u64 = 3600;

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

struct CachedToken {
    token: RedactedToken,
    expires_at: Instant,
}

/// Caches the application token. Concurrent callers wait on one refresh.
pub struct TokenCache {
    http: Client,
    token_url: Url,
    basic_auth: RedactedToken,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new(
        http: Client,
        api_base: &str,
        app_id: &str,
        cert_id: &RedactedToken,
    ) -> Result<Self, MarketDataError> {
        let token_url = Url::parse(api_base)?.join(TOKEN_PATH)?;
        let credentials = STANDARD.encode(format!("{}:{}", app_id, cert_id.as_str()));

        Ok(Self {
            http,
            token_url,
            basic_auth: RedactedToken::new(format!("Basic {credentials}")),
            cached: Mutex::new(None),
        })
    }

    /// Current token, fetching a new one when absent or inside the expiry margin.
    pub async fn token(&self) -> Result<RedactedToken, MarketDataError> {
        let mut cached = self.cached.lock().await;

        if let Some(current) = cached.as_ref()
            && Instant::now() < current.expires_at
        {
            return Ok(current.token.clone());
        }

        let fresh = self.fetch().await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }

    /// Drop the cached token so the next call refreshes.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }

    async fn fetch(&self) -> Result<CachedToken, MarketDataError> {
        debug!("Requesting marketplace token from {}", self.token_url);

        let response = self
            .http
            .post(self.token_url.clone())
            .header(AUTHORIZATION, self.basic_auth.as_str())
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", OAUTH_SCOPE),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::auth(status.as_u16(), body));
        }

        let body: TokenResponse = response.json().await?;
        let lifetime = Duration::from_secs(body.expires_in.saturating_sub(EXPIRY_MARGIN_SECS));
        let token = RedactedToken::new(body.access_token);

        info!(
            "Marketplace token refreshed (length {}, cached for {:?})",
            token.len(),
            lifetime
        );

        Ok(CachedToken {
            token,
            expires_at: Instant::now() + lifetime,
        })
    }
}
