use crate::error::SessionError;
use crate::session::paths::DATA_DIR_ENV;
use crate::session::{AuthSession, PathSource, SessionStore, detect_data_paths};

use common::RedactedToken;
use models::UserProfile;

use serial_test::serial;
use tempfile::TempDir;

/// **VALUE**: Verifies that a saved session restores token and user.
///
/// **WHY THIS MATTERS**: Reloading the page must not force the user through the popup
/// again while their token is still good.
///
/// **BUG THIS CATCHES**: Would catch if the token is dropped because `RedactedToken`
/// refuses serde serialization.
#[test]
fn given_saved_session_when_loading_then_token_and_user_restored() {
    // GIVEN: A stored session
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());
    let session = AuthSession::new(UserProfile::new("Ada", "ada@example.com"))
        .with_token(RedactedToken::new("jwt-value"));

    // WHEN: Saving and loading
    store.save(&session).unwrap();
    let loaded = store.load().unwrap().unwrap();

    // THEN: Equal
    assert_eq!(loaded, session);
    assert_eq!(loaded.token.unwrap().as_str(), "jwt-value");
}

/// **VALUE**: Verifies the on-disk key names.
///
/// **WHY THIS MATTERS**: `authToken` and `user` are the keys the page has always written.
///
/// **BUG THIS CATCHES**: Would catch a rename to snake_case keys.
#[test]
fn given_saved_session_when_reading_raw_file_then_uses_auth_token_and_user_keys() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());
    let session = AuthSession::new(UserProfile::new("Ada", "ada@example.com"))
        .with_token(RedactedToken::new("jwt-value"));

    store.save(&session).unwrap();
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();

    assert_eq!(raw["authToken"], "jwt-value");
    assert_eq!(raw["user"]["email"], "ada@example.com");
    assert_eq!(raw["user"]["displayName"], "Ada");
}

#[test]
fn given_no_file_when_loading_then_returns_none() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());

    assert!(store.load().unwrap().is_none());
}

/// **VALUE**: Verifies a token without a user record does not restore a session.
///
/// **WHY THIS MATTERS**: The authenticated view needs a name and email to show.
///
/// **BUG THIS CATCHES**: Would catch if a half-written session shows an empty user.
#[test]
fn given_token_without_user_when_loading_then_returns_none() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("session.json"), r#"{"authToken":"abc"}"#).unwrap();
    let store = SessionStore::new(dir.path());

    assert!(store.load().unwrap().is_none());
}

#[test]
fn given_corrupt_file_when_loading_then_returns_parse_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("session.json"), "authToken=abc").unwrap();
    let store = SessionStore::new(dir.path());

    assert!(matches!(store.load(), Err(SessionError::Parse { .. })));
}

/// **VALUE**: Verifies clear removes the file and is idempotent.
///
/// **WHY THIS MATTERS**: Sign-out and 401 handling both clear; the second must not fail.
///
/// **BUG THIS CATCHES**: Would catch if clearing an absent file returns an error.
#[test]
fn given_saved_session_when_cleared_twice_then_file_gone_and_no_error() {
    // GIVEN: A stored session
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());
    store
        .save(&AuthSession::new(UserProfile::new("Ada", "ada@example.com")))
        .unwrap();

    // WHEN: Clearing twice
    store.clear().unwrap();
    store.clear().unwrap();

    // THEN: Gone
    assert!(!store.path().exists());
    assert!(store.load().unwrap().is_none());
}

#[test]
#[serial]
fn given_data_dir_env_override_when_detecting_then_uses_override() {
    let dir = TempDir::new().unwrap();
    // SAFETY: serialized with other env-mutating tests.
    unsafe { std::env::set_var(DATA_DIR_ENV, dir.path()) };

    let paths = detect_data_paths().unwrap();

    unsafe { std::env::remove_var(DATA_DIR_ENV) };
    assert_eq!(paths.source, PathSource::EnvVar);
    assert_eq!(paths.session_file, dir.path().join("session.json"));
}
