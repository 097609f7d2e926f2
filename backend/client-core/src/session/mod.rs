//! The signed-in identity and its local persistence.

pub mod paths;
pub mod store;

pub use paths::{DataPaths, PathSource, detect_data_paths};
pub use store::SessionStore;

use common::RedactedToken;
use models::UserProfile;

/// A signed-in user plus the bearer token the backend issued, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user: UserProfile,
    pub token: Option<RedactedToken>,
}

impl AuthSession {
    pub fn new(user: UserProfile) -> Self {
        Self { user, token: None }
    }

    pub fn with_token(mut self, token: RedactedToken) -> Self {
        self.token = Some(token);
        self
    }
}
