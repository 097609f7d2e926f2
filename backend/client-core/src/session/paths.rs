//! Platform-aware detection of the client data directory.
//!
//! Lookup order:
//! 1. CARD_PRICER_DATA_DIR environment variable (explicit override)
//! 2. Platform-specific data directory via `dirs` crate
//! 3. Fallback paths for common configurations

use crate::error::SessionError;

use common::ErrorLocation;

use std::env;
use std::panic::Location;
use std::path::PathBuf;

use log::{debug, info, warn};

pub const DATA_DIR_ENV: &str = "CARD_PRICER_DATA_DIR";
const APP_DIR_NAME: &str = "card-pricer";
const SESSION_FILE_NAME: &str = "session.json";

/// Client data directory detection result.
#[derive(Debug, Clone)]
pub struct DataPaths {
    /// Base data directory (e.g., ~/.local/share/card-pricer on Linux).
    pub data_dir: PathBuf,
    /// Path to the persisted session.
    pub session_file: PathBuf,
    /// How the path was determined.
    pub source: PathSource,
}

impl DataPaths {
    fn new(data_dir: PathBuf, source: PathSource) -> Self {
        let session_file = data_dir.join(SESSION_FILE_NAME);
        Self {
            data_dir,
            session_file,
            source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    EnvVar,
    PlatformDefault,
    LinuxFallback,
    MacOSFallback,
    WindowsFallback,
}

impl std::fmt::Display for PathSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSource::EnvVar => write!(f, "{}", DATA_DIR_ENV),
            PathSource::PlatformDefault => write!(f, "platform default"),
            PathSource::LinuxFallback => write!(f, "Linux fallback"),
            PathSource::MacOSFallback => write!(f, "macOS fallback"),
            PathSource::WindowsFallback => write!(f, "Windows fallback"),
        }
    }
}

/// Detect where `session.json` lives.
///
/// # Errors
/// Returns [`SessionError::PathDetection`] if no directory can be determined.
pub fn detect_data_paths() -> Result<DataPaths, SessionError> {
    if let Ok(custom_dir) = env::var(DATA_DIR_ENV) {
        let data_dir = PathBuf::from(&custom_dir);
        info!("Using {} override: {:?}", DATA_DIR_ENV, data_dir);
        return Ok(DataPaths::new(data_dir, PathSource::EnvVar));
    }

    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_DIR_NAME);
        debug!("Platform data dir: {:?}", app_dir);
        return Ok(DataPaths::new(app_dir, PathSource::PlatformDefault));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(home) = env::var("HOME") {
            let data_dir = PathBuf::from(home).join(".local/share").join(APP_DIR_NAME);
            warn!("Using Linux fallback path: {:?}", data_dir);
            return Ok(DataPaths::new(data_dir, PathSource::LinuxFallback));
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = env::var("HOME") {
            let data_dir = PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR_NAME);
            warn!("Using macOS fallback path: {:?}", data_dir);
            return Ok(DataPaths::new(data_dir, PathSource::MacOSFallback));
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = env::var("APPDATA") {
            let data_dir = PathBuf::from(appdata).join(APP_DIR_NAME);
            warn!("Using Windows fallback path: {:?}", data_dir);
            return Ok(DataPaths::new(data_dir, PathSource::WindowsFallback));
        }
    }

    Err(SessionError::PathDetection {
        message: format!(
            "Cannot determine card pricer data directory. Set {} environment variable.",
            DATA_DIR_ENV
        ),
        location: ErrorLocation::from(Location::caller()),
    })
}
