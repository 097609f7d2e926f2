//! Identity through the pricing server's OAuth endpoints.
//!
//! Flow:
//! 1. `GET /login/google` returns the provider authorization URL
//! 2. The [`AuthPopup`] drives the user through it and yields the authorization code
//! 3. `GET /auth/callback?code=...` exchanges the code for a bearer token and user record

use crate::error::IdentityError;
use crate::identity::IdentityProvider;
use crate::session::AuthSession;

use common::RedactedToken;
use models::UserProfile;

use std::future::Future;
use std::time::Duration;

use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::watch;
use url::Url;

const LOGIN_ENDPOINT: &str = "login/google";
const CALLBACK_ENDPOINT: &str = "auth/callback";
const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);

/// The popup seam: shows the provider page and returns the authorization code.
pub trait AuthPopup: Send + Sync {
    fn authorize(&self, auth_url: &str)
    -> impl Future<Output = Result<String, IdentityError>> + Send;
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    auth_url: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    user: UserProfile,
}

pub struct TokenExchangeProvider<A: AuthPopup> {
    base_url: Url,
    client: Client,
    popup: A,
    state_tx: watch::Sender<Option<UserProfile>>,
}

impl<A: AuthPopup> TokenExchangeProvider<A> {
    /// `base_url_str` may carry a path prefix (`http://host/pricer`); the auth
    /// endpoints are resolved below it.
    pub fn new(base_url_str: &str, popup: A) -> Result<Self, IdentityError> {
        let mut base_url = Url::parse(base_url_str)?;
        if !base_url.path().ends_with('/') {
            let prefixed = format!("{}/", base_url.path());
            base_url.set_path(&prefixed);
        }
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT_DURATION)
            .build()?;
        let (state_tx, _) = watch::channel(None);

        Ok(Self {
            base_url,
            client,
            popup,
            state_tx,
        })
    }

    async fn fetch_auth_url(&self) -> Result<String, IdentityError> {
        let url = self.base_url.join(LOGIN_ENDPOINT)?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(IdentityError::token_exchange(
                response.status().as_u16(),
                response.text().await.unwrap_or_default(),
            ));
        }

        let login: LoginResponse = serde_json::from_str(&response.text().await?)?;
        Ok(login.auth_url)
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, IdentityError> {
        let mut url = self.base_url.join(CALLBACK_ENDPOINT)?;
        url.query_pairs_mut().append_pair("code", code);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(IdentityError::token_exchange(
                response.status().as_u16(),
                response.text().await.unwrap_or_default(),
            ));
        }

        Ok(serde_json::from_str(&response.text().await?)?)
    }
}

impl<A: AuthPopup> IdentityProvider for TokenExchangeProvider<A> {
    async fn sign_in(&self) -> Result<AuthSession, IdentityError> {
        let auth_url = self.fetch_auth_url().await?;
        debug!("Opening sign-in popup");

        let code = self.popup.authorize(&auth_url).await?;
        let token_response = self.exchange_code(&code).await?;

        let token = RedactedToken::new(token_response.access_token);
        info!(
            "Signed in as {} (token type {}, length {})",
            token_response.user.email,
            token_response.token_type.as_deref().unwrap_or("bearer"),
            token.len()
        );

        self.state_tx
            .send_replace(Some(token_response.user.clone()));

        Ok(AuthSession::new(token_response.user).with_token(token))
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        self.state_tx.send_replace(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<UserProfile>> {
        self.state_tx.subscribe()
    }
}
