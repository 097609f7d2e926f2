use serde::{Deserialize, Serialize};

/// Identity-provider user record shown in the authenticated view and persisted
/// under the `user` key of the local session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, alias = "display_name", alias = "name")]
    pub display_name: String,
    #[serde(default)]
    pub email: String,
}

impl UserProfile {
    pub fn new(display_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
        }
    }
}
