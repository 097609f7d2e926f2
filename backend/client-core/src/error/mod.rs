pub mod component;
pub mod config;
pub mod identity;
pub mod pricing_client;
pub mod session;

pub use component::ComponentError;
pub use identity::IdentityError;
pub use pricing_client::PricingClientError;
pub use session::SessionError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    PricingClient(#[from] PricingClientError),

    #[error(transparent)]
    Component(#[from] ComponentError),
}
