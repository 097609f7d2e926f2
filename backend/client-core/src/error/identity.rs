use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

/// Failures of the identity provider's sign-in and sign-out operations.
#[derive(Debug, ThisError)]
pub enum IdentityError {
    #[error("Sign-In Rejected: {message} {location}")]
    SignInRejected {
        message: String,
        location: ErrorLocation,
    },

    #[error("Sign-Out Rejected: {message} {location}")]
    SignOutRejected {
        message: String,
        location: ErrorLocation,
    },

    #[error("Popup Closed Error: {message} {location}")]
    PopupClosed {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token Exchange Error: HTTP {status_code} - {message} {location}")]
    TokenExchange {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Identity Network Error: {message} {location}")]
    Network {
        message: String,
        location: ErrorLocation,
    },

    #[error("Identity JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("Identity URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },
}

impl IdentityError {
    #[track_caller]
    pub fn sign_in_rejected(message: impl Into<String>) -> Self {
        IdentityError::SignInRejected {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn sign_out_rejected(message: impl Into<String>) -> Self {
        IdentityError::SignOutRejected {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn popup_closed(message: impl Into<String>) -> Self {
        IdentityError::PopupClosed {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn token_exchange(status_code: u16, body: impl Into<String>) -> Self {
        IdentityError::TokenExchange {
            status_code: HttpStatusCode(status_code),
            message: body.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for IdentityError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        IdentityError::Network {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for IdentityError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        IdentityError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<url::ParseError> for IdentityError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        IdentityError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
