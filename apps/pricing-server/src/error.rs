use common::ErrorLocation;
use market_data::MarketDataError;
use models::ModelError;
use pricing_engine::RulesError;

use std::panic::Location;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};
use serde_json::json;
use thiserror::Error;

pub const INVALID_CREDENTIALS: &str = "Could not validate credentials";

/// Errors raised while serving a request or starting the server.
///
/// Every variant renders as `{"error": "..."}` with a status picked by
/// [`ServerError::status`]. Locations are logged, never sent to clients.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Server Error: {message} {location}")]
    Server {
        message: String,
        location: ErrorLocation,
    },

    #[error("Config Error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },

    #[error("Bad Request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    #[error("OAuth Error: {message} {location}")]
    OAuth {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Market(#[from] MarketDataError),

    #[error(transparent)]
    Rules(#[from] RulesError),
}

impl ServerError {
    #[track_caller]
    pub fn server(message: impl Into<String>) -> Self {
        ServerError::Server {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn config(message: impl Into<String>) -> Self {
        ServerError::Config {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn bad_request(message: impl Into<String>) -> Self {
        ServerError::BadRequest {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unauthorized() -> Self {
        ServerError::Unauthorized {
            message: INVALID_CREDENTIALS.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn oauth(message: impl Into<String>) -> Self {
        ServerError::OAuth {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ServerError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ServerError::OAuth { .. } => StatusCode::BAD_REQUEST,
            ServerError::Market(_) => StatusCode::BAD_GATEWAY,
            ServerError::Server { .. } | ServerError::Config { .. } | ServerError::Rules(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message sent to clients.
    pub fn public_message(&self) -> String {
        match self {
            ServerError::BadRequest { message, .. }
            | ServerError::Unauthorized { message, .. }
            | ServerError::OAuth { message, .. } => message.clone(),
            ServerError::Market(e) => format!("Marketplace request failed ({})", e.error_category()),
            ServerError::Server { .. } | ServerError::Config { .. } | ServerError::Rules(_) => {
                String::from("Internal server error")
            }
        }
    }
}

impl From<ModelError> for ServerError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        match error {
            ModelError::Validation { message, .. } => ServerError::bad_request(message),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{self}");
        } else {
            warn!("{self}");
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
