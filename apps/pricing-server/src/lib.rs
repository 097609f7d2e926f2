//! HTTP service for card valuations.
//!
//! - `POST /api/price`: price a card from marketplace data
//! - `GET /login/google`, `GET /auth/callback`: issue bearer tokens
//! - `GET /health`

pub mod auth;
pub mod config;
pub mod error;
pub mod logger;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

use crate::error::ServerError;

use log::info;
use tokio::net::TcpListener;

pub use routes::router;
pub use state::{AppState, SharedState};

/// Serve on an already bound listener until the process exits.
pub async fn serve(listener: TcpListener, state: SharedState) -> Result<(), ServerError> {
    let addr = listener
        .local_addr()
        .map_err(|e| ServerError::server(format!("Listener has no address: {e}")))?;
    info!("Pricing server listening on http://{addr}");

    axum::serve(listener, router(state))
        .await
        .map_err(|e| ServerError::server(format!("Server stopped: {e}")))
}
