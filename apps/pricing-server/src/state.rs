use crate::auth::google::GoogleOAuth;
use crate::config::ServerConfig;
use crate::error::ServerError;

use common::RedactedToken;
use market_data::EbayClient;
use pricing_engine::Pricer;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

const OAUTH_TIMEOUT: Duration = Duration::from_secs(15);

/// Shared by every handler. Built once at startup.
pub struct AppState {
    pub market: EbayClient,
    pub pricer: Pricer,
    pub google: GoogleOAuth,
    pub secret_key: RedactedToken,
    pub require_auth: bool,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn from_config(config: ServerConfig) -> Result<SharedState, ServerError> {
        let http = Client::builder()
            .timeout(OAUTH_TIMEOUT)
            .build()
            .map_err(|e| ServerError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Arc::new(Self {
            market: EbayClient::new(config.market)?,
            pricer: Pricer::new(config.rules),
            google: GoogleOAuth::new(config.google, http),
            secret_key: config.secret_key,
            require_auth: config.require_auth,
        }))
    }
}
