//! Identity providers that gate the pricing form.
//!
//! A provider publishes the current user on a `watch` channel and exposes the
//! popup-style sign-in and the sign-out operations. The component never inspects
//! provider internals; it only reacts to emissions and operation results.

pub mod local;
pub mod token_exchange;

pub use local::LocalIdentityProvider;
pub use token_exchange::{AuthPopup, TokenExchangeProvider};

use crate::error::IdentityError;
use crate::session::AuthSession;

use models::UserProfile;

use std::future::Future;

use tokio::sync::watch;

pub trait IdentityProvider: Send + Sync {
    /// Run the provider-hosted sign-in flow.
    fn sign_in(&self) -> impl Future<Output = Result<AuthSession, IdentityError>> + Send;

    fn sign_out(&self) -> impl Future<Output = Result<(), IdentityError>> + Send;

    /// Session-state stream. The current value is the signed-in user, if any.
    fn subscribe(&self) -> watch::Receiver<Option<UserProfile>>;
}
