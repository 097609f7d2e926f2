//! Page state managed by a single actor task.
//!
//! Every mutation of the [`PageView`] is a [`StateCommand`] applied in order by
//! one task; readers take `RwLock` snapshots. Result-bearing commands carry the
//! submission generation and are dropped when a newer one has started.

use crate::error::ComponentError;
use crate::view::{FormField, PageView, ResultsView, SectionId};

use models::UserProfile;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, info, warn};
use tokio::sync::{Mutex, RwLock, mpsc, oneshot};

#[derive(Debug)]
pub enum StateCommand {
    /// Session-state emission from the identity provider.
    ApplySession(Option<UserProfile>),

    SetField(FormField, String),

    /// Insert the loading placeholder for a new submission.
    BeginSubmit { generation: u64 },

    ApplyResults {
        generation: u64,
        results: Box<ResultsView>,
    },

    ApplyError { generation: u64, message: String },

    ToggleSection(SectionId),

    /// The backend rejected the token for this submission: back to a fresh
    /// signed-out page, unless a newer submission or sign-out has started.
    Expire { generation: u64 },
}

struct Envelope {
    command: StateCommand,
    applied_tx: oneshot::Sender<bool>,
}

#[derive(Clone)]
pub struct PageState {
    command_tx: Arc<Mutex<Option<mpsc::Sender<Envelope>>>>,
    view: Arc<RwLock<PageView>>,
    actor_init: Arc<Mutex<bool>>,
    latest_generation: Arc<AtomicU64>,
}

impl PageState {
    /// The actor is spawned lazily on first update.
    pub fn new() -> Self {
        Self {
            command_tx: Arc::new(Mutex::new(None)),
            view: Arc::new(RwLock::new(PageView::signed_out())),
            actor_init: Arc::new(Mutex::new(false)),
            latest_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Apply a command and wait for it to land.
    ///
    /// Returns whether the command changed the view. Generation-tagged commands
    /// return `false` when superseded.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::State`] if the actor has stopped.
    pub async fn update(&self, command: StateCommand) -> Result<bool, ComponentError> {
        self.ensure_actor().await;

        let tx = {
            let tx_guard = self.command_tx.lock().await;
            tx_guard
                .as_ref()
                .cloned()
                .ok_or_else(|| ComponentError::state("State actor not initialized"))?
        };

        let (applied_tx, applied_rx) = oneshot::channel();
        tx.send(Envelope {
            command,
            applied_tx,
        })
        .await
        .map_err(|e| ComponentError::state(format!("State actor died: {}", e)))?;

        applied_rx
            .await
            .map_err(|e| ComponentError::state(format!("State actor dropped reply: {}", e)))
    }

    pub async fn snapshot(&self) -> PageView {
        self.view.read().await.clone()
    }

    /// Claim the next submission generation. Any earlier generation is stale from now on.
    pub fn next_generation(&self) -> u64 {
        self.latest_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn ensure_actor(&self) {
        let mut init_guard = self.actor_init.lock().await;
        if !*init_guard {
            let (tx, rx) = mpsc::channel(100);

            let mut tx_guard = self.command_tx.lock().await;
            *tx_guard = Some(tx);
            drop(tx_guard);

            tokio::spawn(state_actor(
                rx,
                Arc::clone(&self.view),
                Arc::clone(&self.latest_generation),
            ));
            *init_guard = true;
            info!("Page state actor spawned");
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}

async fn state_actor(
    mut command_rx: mpsc::Receiver<Envelope>,
    view: Arc<RwLock<PageView>>,
    latest_generation: Arc<AtomicU64>,
) {
    while let Some(Envelope {
        command,
        applied_tx,
    }) = command_rx.recv().await
    {
        let applied = apply(&view, &latest_generation, command).await;
        if applied_tx.send(applied).is_err() {
            debug!("State update caller went away before acknowledgement");
        }
    }

    debug!("Page state actor stopped");
}

async fn apply(
    view: &RwLock<PageView>,
    latest_generation: &AtomicU64,
    command: StateCommand,
) -> bool {
    let is_current = |generation: u64| latest_generation.load(Ordering::SeqCst) == generation;
    let mut page = view.write().await;

    match command {
        StateCommand::ApplySession(user) => {
            if user.is_none() {
                // In-flight responses must not render into a signed-out page.
                latest_generation.fetch_add(1, Ordering::SeqCst);
            }
            page.apply_session(user.as_ref());
            true
        }
        StateCommand::SetField(field, value) => {
            page.form.set(field, value);
            true
        }
        StateCommand::BeginSubmit { generation } => {
            if !is_current(generation) {
                return false;
            }
            page.loading = true;
            page.error = None;
            page.results_visible = true;
            true
        }
        StateCommand::ApplyResults {
            generation,
            results,
        } => {
            if !is_current(generation) {
                info!("Dropping superseded results for generation {}", generation);
                return false;
            }
            page.loading = false;
            page.error = None;
            page.results = Some(*results);
            page.results_visible = true;
            true
        }
        StateCommand::ApplyError {
            generation,
            message,
        } => {
            if !is_current(generation) {
                info!("Dropping superseded error for generation {}", generation);
                return false;
            }
            page.loading = false;
            page.error = Some(message);
            page.results_visible = true;
            true
        }
        StateCommand::ToggleSection(id) => match page.results.as_mut() {
            Some(results) => {
                results.section_mut(id).toggle.toggle();
                true
            }
            None => {
                warn!("Toggle for {:?} ignored: nothing rendered", id);
                false
            }
        },
        StateCommand::Expire { generation } => {
            if !is_current(generation) {
                info!("Ignoring 401 for superseded generation {}", generation);
                return false;
            }
            latest_generation.fetch_add(1, Ordering::SeqCst);
            *page = PageView::signed_out();
            true
        }
    }
}
