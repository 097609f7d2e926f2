//! Marketplace errors.

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum MarketDataError {
    #[error("Marketplace Auth Error: HTTP {status_code} - {message} {location}")]
    Auth {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Marketplace API Error: HTTP {status_code} - {message} {location}")]
    Api {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Network Error: {message} {location}")]
    Network {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Marketplace Config Error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },
}

impl MarketDataError {
    #[track_caller]
    pub fn auth(status_code: u16, message: impl Into<String>) -> Self {
        MarketDataError::Auth {
            status_code: HttpStatusCode(status_code),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        MarketDataError::Api {
            status_code: HttpStatusCode(status_code),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn config(message: impl Into<String>) -> Self {
        MarketDataError::Config {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            return Self::api(status.as_u16(), error.to_string());
        }

        if error.is_decode() {
            return MarketDataError::Json {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        MarketDataError::Network {
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Transient failures worth another attempt: 429/5xx gateway codes, timeouts and
    /// refused connections.
    pub fn is_retryable(&self) -> bool {
        match self {
            MarketDataError::Api { status_code, .. } => status_code.is_retryable(),
            MarketDataError::Network {
                is_timeout,
                is_connection,
                ..
            } => *is_timeout || *is_connection,
            _ => false,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            MarketDataError::Auth { status_code, .. } | MarketDataError::Api { status_code, .. } => {
                Some(status_code.0)
            }
            _ => None,
        }
    }

    /// Get error category for logging.
    pub fn error_category(&self) -> &'static str {
        match self {
            MarketDataError::Auth { .. } => "auth",
            MarketDataError::Api { status_code, .. } if status_code.is_client_error() => {
                "client_error"
            }
            MarketDataError::Api { status_code, .. } if status_code.is_server_error() => {
                "server_error"
            }
            MarketDataError::Api { .. } => "http",
            MarketDataError::Network { is_timeout: true, .. } => "timeout",
            MarketDataError::Network { is_connection: true, .. } => "connection",
            MarketDataError::Network { .. } => "network",
            MarketDataError::Json { .. } => "json",
            MarketDataError::UrlParse { .. } => "url_parse",
            MarketDataError::Config { .. } => "config",
        }
    }
}

impl From<reqwest::Error> for MarketDataError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        MarketDataError::from_reqwest(&error)
    }
}

impl From<serde_json::Error> for MarketDataError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        MarketDataError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<url::ParseError> for MarketDataError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        MarketDataError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
