//! Errors from the pricing endpoint client.
//!
//! HTTP status codes are stored as [`HttpStatusCode`] so a 401 can be told apart
//! from other failures without inspecting message text.

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum PricingClientError {
    #[error("Network Error: {message} {location}")]
    Network {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("Server Error: HTTP {status_code} - {message} {location}")]
    Server {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Unauthorized: bearer token rejected {location}")]
    Unauthorized { location: ErrorLocation },

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
}

impl PricingClientError {
    #[track_caller]
    pub fn unauthorized() -> Self {
        PricingClientError::Unauthorized {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Build from a non-success response. 401 maps to [`PricingClientError::Unauthorized`].
    #[track_caller]
    pub fn from_http_response(status_code: u16, body: impl Into<String>) -> Self {
        let status_code = HttpStatusCode(status_code);
        if status_code.is_unauthorized() {
            return PricingClientError::Unauthorized {
                location: ErrorLocation::from(Location::caller()),
            };
        }

        PricingClientError::Server {
            status_code,
            message: body.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from reqwest error with proper categorization.
    #[track_caller]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            return Self::from_http_response(status.as_u16(), error.to_string());
        }

        if error.is_decode() {
            return PricingClientError::Json {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        PricingClientError::Network {
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, PricingClientError::Unauthorized { .. })
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            PricingClientError::Server { status_code, .. } => Some(status_code.0),
            PricingClientError::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }

    /// Get error category for logging.
    pub fn error_category(&self) -> &'static str {
        match self {
            PricingClientError::Network { is_timeout: true, .. } => "timeout",
            PricingClientError::Network { is_connection: true, .. } => "connection",
            PricingClientError::Network { .. } => "network",
            PricingClientError::Server { status_code, .. } if status_code.is_client_error() => {
                "client_error"
            }
            PricingClientError::Server { status_code, .. } if status_code.is_server_error() => {
                "server_error"
            }
            PricingClientError::Server { .. } => "http",
            PricingClientError::Unauthorized { .. } => "unauthorized",
            PricingClientError::Json { .. } => "json",
            PricingClientError::UrlParse { .. } => "url_parse",
        }
    }
}

impl From<reqwest::Error> for PricingClientError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        PricingClientError::from_reqwest(&error)
    }
}

impl From<serde_json::Error> for PricingClientError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        PricingClientError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<url::ParseError> for PricingClientError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        PricingClientError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
