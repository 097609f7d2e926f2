use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ComponentError {
    #[error("Page State Error: {message} {location}")]
    State {
        message: String,
        location: ErrorLocation,
    },
}

impl ComponentError {
    #[track_caller]
    pub fn state(message: impl Into<String>) -> Self {
        ComponentError::State {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
