use crate::error::IdentityError;
use crate::identity::IdentityProvider;
use crate::session::AuthSession;

use common::RedactedToken;
use models::UserProfile;

use std::sync::atomic::{AtomicBool, Ordering};

use log::info;
use tokio::sync::watch;

/// In-process identity provider with programmable outcomes.
///
/// Sign-in publishes the configured user; sign-out publishes `None`. Either can be
/// made to fail, and [`LocalIdentityProvider::emit`] pushes an arbitrary state change
/// as if the provider had changed on its own.
pub struct LocalIdentityProvider {
    user: UserProfile,
    token: Option<RedactedToken>,
    state_tx: watch::Sender<Option<UserProfile>>,
    fail_sign_in: AtomicBool,
    fail_sign_out: AtomicBool,
}

impl LocalIdentityProvider {
    pub fn new(user: UserProfile) -> Self {
        let (state_tx, _) = watch::channel(None);
        Self {
            user,
            token: None,
            state_tx,
            fail_sign_in: AtomicBool::new(false),
            fail_sign_out: AtomicBool::new(false),
        }
    }

    /// Hand out this bearer token on sign-in.
    pub fn with_token(mut self, token: RedactedToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Start with the user already signed in.
    pub fn signed_in(self) -> Self {
        self.state_tx.send_replace(Some(self.user.clone()));
        self
    }

    pub fn set_sign_in_failure(&self, fail: bool) {
        self.fail_sign_in.store(fail, Ordering::SeqCst);
    }

    pub fn set_sign_out_failure(&self, fail: bool) {
        self.fail_sign_out.store(fail, Ordering::SeqCst);
    }

    /// Publish a state change without going through sign-in or sign-out.
    pub fn emit(&self, user: Option<UserProfile>) {
        self.state_tx.send_replace(user);
    }
}

impl IdentityProvider for LocalIdentityProvider {
    async fn sign_in(&self) -> Result<AuthSession, IdentityError> {
        if self.fail_sign_in.load(Ordering::SeqCst) {
            return Err(IdentityError::sign_in_rejected("popup sign-in was rejected"));
        }

        info!("Local sign-in as {}", self.user.email);
        self.state_tx.send_replace(Some(self.user.clone()));

        Ok(AuthSession {
            user: self.user.clone(),
            token: self.token.clone(),
        })
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(IdentityError::sign_out_rejected("sign-out was rejected"));
        }

        self.state_tx.send_replace(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<UserProfile>> {
        self.state_tx.subscribe()
    }
}
