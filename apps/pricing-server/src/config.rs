//! Server settings from the environment.
//!
//! A `.env` file is loaded first from the working directory, then from next to the
//! executable. Variables already set in the process win over the file.

use crate::error::ServerError;

use common::RedactedToken;
use market_data::{EBAY_API_BASE, MarketConfig};
use pricing_engine::PricingRules;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use log::{debug, warn};

// ============================================
// VARIABLE NAMES
// ============================================

pub const BIND_ADDR_VAR: &str = "BIND_ADDR";
pub const EBAY_APP_ID_VAR: &str = "EBAY_APP_ID";
pub const EBAY_CERT_ID_VAR: &str = "EBAY_CERT_ID";
pub const EBAY_API_BASE_VAR: &str = "EBAY_API_BASE";
pub const GOOGLE_CLIENT_ID_VAR: &str = "GOOGLE_CLIENT_ID";
pub const GOOGLE_CLIENT_SECRET_VAR: &str = "GOOGLE_CLIENT_SECRET";
pub const GOOGLE_REDIRECT_URI_VAR: &str = "GOOGLE_REDIRECT_URI";
pub const GOOGLE_AUTH_URL_VAR: &str = "GOOGLE_AUTH_URL";
pub const GOOGLE_TOKEN_URL_VAR: &str = "GOOGLE_TOKEN_URL";
pub const GOOGLE_USERINFO_URL_VAR: &str = "GOOGLE_USERINFO_URL";
pub const SECRET_KEY_VAR: &str = "SECRET_KEY";
pub const REQUIRE_AUTH_VAR: &str = "REQUIRE_AUTH";
pub const LOG_DIR_VAR: &str = "LOG_DIR";
pub const PRICING_RULES_VAR: &str = "PRICING_RULES";

// ============================================
// DEFAULTS
// ============================================

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8000/auth/callback";
pub const DEFAULT_GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const DEFAULT_GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const ACCESS_TOKEN_MINUTES: i64 = 30;

/// Google OAuth client settings.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: RedactedToken,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub market: MarketConfig,
    pub google: GoogleConfig,
    /// HS256 key for issued access tokens.
    pub secret_key: RedactedToken,
    /// Reject `/api/price` calls without a valid bearer token.
    pub require_auth: bool,
    pub rules: PricingRules,
}

impl ServerConfig {
    /// Read the process environment. Call [`load_dotenv`] first to pick up `.env`.
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());
        let required = |key: &str| {
            get(key).ok_or_else(|| ServerError::config(format!("{key} must be set")))
        };

        let bind_addr = get_or(BIND_ADDR_VAR, DEFAULT_BIND_ADDR)
            .parse::<SocketAddr>()
            .map_err(|e| ServerError::config(format!("{BIND_ADDR_VAR} is not host:port: {e}")))?;

        let require_auth = match get(REQUIRE_AUTH_VAR) {
            None => true,
            Some(value) => parse_bool(&value).ok_or_else(|| {
                ServerError::config(format!("{REQUIRE_AUTH_VAR} must be true or false"))
            })?,
        };

        let rules = match get(PRICING_RULES_VAR) {
            Some(path) => PricingRules::load(Path::new(&path))?,
            None => PricingRules::default(),
        };

        let secret_key = RedactedToken::new(required(SECRET_KEY_VAR)?);

        let market = MarketConfig::new(
            required(EBAY_APP_ID_VAR)?,
            RedactedToken::new(required(EBAY_CERT_ID_VAR)?),
        )
        .with_api_base(get_or(EBAY_API_BASE_VAR, EBAY_API_BASE))
        .with_window(rules.sold_window_days, rules.max_results);

        let google = GoogleConfig {
            client_id: get(GOOGLE_CLIENT_ID_VAR).unwrap_or_default(),
            client_secret: RedactedToken::new(get(GOOGLE_CLIENT_SECRET_VAR).unwrap_or_default()),
            redirect_uri: get_or(GOOGLE_REDIRECT_URI_VAR, DEFAULT_REDIRECT_URI),
            auth_url: get_or(GOOGLE_AUTH_URL_VAR, DEFAULT_GOOGLE_AUTH_URL),
            token_url: get_or(GOOGLE_TOKEN_URL_VAR, DEFAULT_GOOGLE_TOKEN_URL),
            userinfo_url: get_or(GOOGLE_USERINFO_URL_VAR, DEFAULT_GOOGLE_USERINFO_URL),
        };

        if google.client_id.is_empty() {
            warn!("{GOOGLE_CLIENT_ID_VAR} is not set; sign-in will fail");
        }

        let config = Self {
            bind_addr,
            market,
            google,
            secret_key,
            require_auth,
            rules,
        };

        debug!(
            "Config: bind={}, require_auth={}, secret_key length={}",
            config.bind_addr,
            config.require_auth,
            config.secret_key.len()
        );
        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Load `.env` from the working directory or next to the executable. Returns the
/// file used, if any.
pub fn load_dotenv() -> Option<PathBuf> {
    if let Ok(path) = dotenvy::dotenv() {
        return Some(path);
    }

    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(".env")))?;
    dotenvy::from_path(&beside_exe).ok()?;
    Some(beside_exe)
}
