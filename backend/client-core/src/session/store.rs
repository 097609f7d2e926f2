use crate::error::SessionError;
use crate::session::AuthSession;
use crate::session::paths::{DataPaths, detect_data_paths};

use common::{ErrorLocation, RedactedToken};
use models::UserProfile;

use std::io::ErrorKind;
use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

/// On-disk shape: the two local-storage keys the page has always used.
#[derive(Serialize)]
struct PersistedSessionRef<'a> {
    #[serde(rename = "authToken")]
    auth_token: Option<&'a str>,
    user: &'a UserProfile,
}

#[derive(Deserialize)]
struct PersistedSession {
    #[serde(rename = "authToken", default)]
    auth_token: Option<String>,
    #[serde(default)]
    user: Option<UserProfile>,
}

/// Reads and writes `session.json`.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("session.json"),
        }
    }

    /// Store in the detected platform data directory.
    pub fn detect() -> Result<Self, SessionError> {
        let DataPaths {
            session_file,
            source,
            ..
        } = detect_data_paths()?;
        info!("Session file at {:?} ({})", session_file, source);
        Ok(Self { path: session_file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session.
    ///
    /// Returns `Ok(None)` when nothing is stored or no user record is present; a token
    /// without a user cannot restore the authenticated view.
    pub fn load(&self) -> Result<Option<AuthSession>, SessionError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No persisted session at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(SessionError::Read {
                    location: ErrorLocation::from(Location::caller()),
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let persisted: PersistedSession =
            serde_json::from_str(&contents).map_err(|e| SessionError::Parse {
                location: ErrorLocation::from(Location::caller()),
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        Ok(persisted.user.map(|user| AuthSession {
            user,
            token: persisted
                .auth_token
                .filter(|token| !token.is_empty())
                .map(RedactedToken::new),
        }))
    }

    /// Persist the session through a temp file and rename.
    pub fn save(&self, session: &AuthSession) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SessionError::Write {
                location: ErrorLocation::from(Location::caller()),
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let persisted = PersistedSessionRef {
            auth_token: session.token.as_ref().map(RedactedToken::as_str),
            user: &session.user,
        };
        let json =
            serde_json::to_string_pretty(&persisted).map_err(|e| SessionError::Serialize {
                location: ErrorLocation::from(Location::caller()),
                reason: e.to_string(),
            })?;

        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, json).map_err(|e| SessionError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| SessionError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            source: e,
        })?;

        info!(
            "Session saved for {} (token length {})",
            session.user.email,
            session.token.as_ref().map_or(0, RedactedToken::len)
        );
        Ok(())
    }

    /// Remove both persisted keys. Clearing an absent session is not an error.
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Persisted session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Write {
                location: ErrorLocation::from(Location::caller()),
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}
