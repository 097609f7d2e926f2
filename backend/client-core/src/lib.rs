//! Client side of the card pricer: the pricing form component.
//!
//! [`component::PricerComponent`] is mounted once. It watches an
//! [`identity::IdentityProvider`] to gate the form behind sign-in, submits
//! [`models::CardQuery`] values to the pricing endpoint through
//! [`pricing_client::PricingClient`], and renders the answer into the
//! [`view::PageView`] model that a front end draws.

pub mod component;
pub mod config;
pub mod error;
pub mod field_normalizer;
pub mod identity;
pub mod pricing_client;
pub mod render;
pub mod session;
pub mod view;

#[cfg(test)]
mod tests;

pub const PRICING_SERVER_HOSTNAME: &str = "127.0.0.1";
pub const PRICING_SERVER_PORT: u16 = 8000;
pub const PRICING_SERVER_BASE_URL: &str =
    const_format::concatcp!("http://", PRICING_SERVER_HOSTNAME, ":", PRICING_SERVER_PORT);
pub const PRICE_ENDPOINT: &str = "/api/price";
