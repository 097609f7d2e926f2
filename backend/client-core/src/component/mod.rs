//! The pricing form component.
//!
//! Lifecycle: [`PricerComponent::mount`] restores any persisted session and starts
//! the auth listener; [`PricerComponent::unmount`] stops it. Between the two, the
//! host forwards user actions (field edits, sign-in, sign-out, submit, section
//! toggles) and draws [`PricerComponent::view`].

pub mod state;

pub use state::{PageState, StateCommand};

use crate::config::ClientConfig;
use crate::error::{ComponentError, CoreError, IdentityError, PricingClientError};
use crate::identity::IdentityProvider;
use crate::pricing_client::PricingClient;
use crate::render::render_results;
use crate::session::{AuthSession, SessionStore};
use crate::view::{FormField, PageView, SectionId};

use common::RedactedToken;

use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::sync::{Mutex, RwLock, broadcast};
use tokio::task::JoinHandle;

pub const SIGN_IN_ALERT: &str = "Error signing in with Google. Please try again.";
pub const SIGN_OUT_ALERT: &str = "Error signing out. Please try again.";
pub const SIGN_IN_FIRST_ALERT: &str = "Please sign in first";
pub const PRICE_ERROR_ALERT: &str = "Error getting price prediction. Please try again.";

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Side effects the host must carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// Show a blocking alert with this text.
    Alert(String),
    /// The session was invalidated; the host should reload the page.
    Reload,
}

#[derive(Debug)]
pub enum AuthOutcome {
    SignedIn,
    SignedOut,
    /// The provider refused; an alert was raised and nothing changed.
    Failed(IdentityError),
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Rendered,
    /// No token while one is required; nothing was sent.
    Rejected,
    /// A newer submission, sign-out or reload started before the response arrived.
    /// Also covers a 401 for a token that has since been replaced.
    Superseded,
    /// The backend answered 401; the session was cleared and a reload requested.
    SessionExpired,
    Failed(PricingClientError),
}

pub struct PricerComponent<P: IdentityProvider + 'static> {
    provider: Arc<P>,
    client: PricingClient,
    store: SessionStore,
    require_token: bool,
    state: PageState,
    token: Arc<RwLock<Option<RedactedToken>>>,
    events: broadcast::Sender<PageEvent>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl<P: IdentityProvider + 'static> PricerComponent<P> {
    pub fn new(
        provider: Arc<P>,
        config: &ClientConfig,
        store: SessionStore,
    ) -> Result<Self, CoreError> {
        config.validate()?;
        let client = PricingClient::new(&config.api)?;
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            provider,
            client,
            store,
            require_token: config.api.require_token,
            state: PageState::new(),
            token: Arc::new(RwLock::new(None)),
            events,
            listener: Mutex::new(None),
        })
    }

    pub fn events(&self) -> broadcast::Receiver<PageEvent> {
        self.events.subscribe()
    }

    pub async fn view(&self) -> PageView {
        self.state.snapshot().await
    }

    pub async fn is_mounted(&self) -> bool {
        self.listener.lock().await.is_some()
    }

    /// Restore the session and subscribe to provider state. Mounting twice is a no-op.
    pub async fn mount(&self) -> Result<(), CoreError> {
        let mut listener = self.listener.lock().await;
        if listener.is_some() {
            warn!("Pricer component already mounted");
            return Ok(());
        }

        let mut state_rx = self.provider.subscribe();

        let persisted = match self.store.load() {
            Ok(persisted) => persisted,
            Err(e) => {
                warn!("Ignoring unreadable persisted session: {}", e);
                None
            }
        };

        match persisted {
            Some(session) => {
                info!("Restoring persisted session for {}", session.user.email);
                state_rx.mark_unchanged();
                *self.token.write().await = session.token;
                self.state
                    .update(StateCommand::ApplySession(Some(session.user)))
                    .await?;
            }
            None => {
                let current = state_rx.borrow_and_update().clone();
                self.state
                    .update(StateCommand::ApplySession(current))
                    .await?;
            }
        }

        let state = self.state.clone();
        *listener = Some(tokio::spawn(async move {
            while state_rx.changed().await.is_ok() {
                let user = state_rx.borrow_and_update().clone();
                debug!("Session state changed (signed in: {})", user.is_some());
                if let Err(e) = state.update(StateCommand::ApplySession(user)).await {
                    error!("Auth listener stopping: {}", e);
                    break;
                }
            }
        }));

        info!("Pricer component mounted");
        Ok(())
    }

    /// Stop the auth listener.
    pub async fn unmount(&self) {
        if let Some(handle) = self.listener.lock().await.take() {
            handle.abort();
            info!("Pricer component unmounted");
        }
    }

    pub async fn set_field(
        &self,
        field: FormField,
        value: impl Into<String>,
    ) -> Result<(), ComponentError> {
        self.state
            .update(StateCommand::SetField(field, value.into()))
            .await?;
        Ok(())
    }

    pub async fn sign_in(&self) -> Result<AuthOutcome, ComponentError> {
        let session = match self.provider.sign_in().await {
            Ok(session) => session,
            Err(e) => {
                error!("Error during sign in: {}", e);
                self.alert(SIGN_IN_ALERT);
                return Ok(AuthOutcome::Failed(e));
            }
        };

        self.persist(&session);
        *self.token.write().await = session.token.clone();
        self.state
            .update(StateCommand::ApplySession(Some(session.user)))
            .await?;

        Ok(AuthOutcome::SignedIn)
    }

    pub async fn sign_out(&self) -> Result<AuthOutcome, ComponentError> {
        if let Err(e) = self.provider.sign_out().await {
            error!("Error signing out: {}", e);
            self.alert(SIGN_OUT_ALERT);
            return Ok(AuthOutcome::Failed(e));
        }

        self.forget_session().await;
        self.state.update(StateCommand::ApplySession(None)).await?;

        Ok(AuthOutcome::SignedOut)
    }

    /// Send the current form as one pricing request and render the answer.
    pub async fn submit(&self) -> Result<SubmitOutcome, ComponentError> {
        let token = self.token.read().await.clone();
        if self.require_token && token.is_none() {
            self.alert(SIGN_IN_FIRST_ALERT);
            return Ok(SubmitOutcome::Rejected);
        }

        let query = self.state.snapshot().await.form.to_query();
        let generation = self.state.next_generation();
        self.state
            .update(StateCommand::BeginSubmit { generation })
            .await?;

        match self.client.fetch_price(&query, token.as_ref()).await {
            Ok(response) => {
                let results = Box::new(render_results(&response));
                let applied = self
                    .state
                    .update(StateCommand::ApplyResults {
                        generation,
                        results,
                    })
                    .await?;

                if applied {
                    Ok(SubmitOutcome::Rendered)
                } else {
                    Ok(SubmitOutcome::Superseded)
                }
            }
            Err(e) if e.is_unauthorized() => {
                if !self.expire_session(generation).await? {
                    return Ok(SubmitOutcome::Superseded);
                }
                Ok(SubmitOutcome::SessionExpired)
            }
            Err(e) => {
                error!("Error getting price: {}", e);
                let applied = self
                    .state
                    .update(StateCommand::ApplyError {
                        generation,
                        message: PRICE_ERROR_ALERT.to_string(),
                    })
                    .await?;

                if !applied {
                    return Ok(SubmitOutcome::Superseded);
                }

                self.alert(PRICE_ERROR_ALERT);
                Ok(SubmitOutcome::Failed(e))
            }
        }
    }

    /// Flip a list section. Returns `false` when nothing is rendered yet.
    pub async fn toggle_section(&self, id: SectionId) -> Result<bool, ComponentError> {
        self.state.update(StateCommand::ToggleSection(id)).await
    }

    fn alert(&self, message: &str) {
        if self.events.send(PageEvent::Alert(message.to_string())).is_err() {
            debug!("Alert with no listener: {}", message);
        }
    }

    fn persist(&self, session: &AuthSession) {
        if let Err(e) = self.store.save(session) {
            warn!("Failed to persist session: {}", e);
        }
    }

    async fn forget_session(&self) {
        *self.token.write().await = None;
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear persisted session: {}", e);
        }
    }

    /// Returns `false` when the rejected request was already superseded; the
    /// current session is then left alone.
    async fn expire_session(&self, generation: u64) -> Result<bool, ComponentError> {
        let expired = self
            .state
            .update(StateCommand::Expire { generation })
            .await?;
        if !expired {
            return Ok(false);
        }

        warn!("Bearer token rejected, clearing session");
        self.forget_session().await;
        if self.events.send(PageEvent::Reload).is_err() {
            debug!("Reload requested with no listener");
        }
        Ok(true)
    }
}

impl<P: IdentityProvider + 'static> Drop for PricerComponent<P> {
    fn drop(&mut self) {
        if let Some(handle) = self.listener.get_mut().take() {
            handle.abort();
        }
    }
}
