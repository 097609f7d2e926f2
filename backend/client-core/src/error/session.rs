use std::path::PathBuf;

use common::ErrorLocation;
use thiserror::Error;

/// Errors reading or writing the persisted session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session Path Detection Error: {message} {location}")]
    PathDetection {
        message: String,
        location: ErrorLocation,
    },

    #[error("Session Read Error: {path}: {source} {location}")]
    Read {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session Parse Error: {path}: {reason} {location}")]
    Parse {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Session Write Error: {path}: {source} {location}")]
    Write {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session Serialization Error: {reason} {location}")]
    Serialize {
        location: ErrorLocation,
        reason: String,
    },
}
