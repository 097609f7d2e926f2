//! Shared primitives for the card pricer workspace.
//!
//! Everything here is dependency-light and used by every other crate:
//!
//! - **ErrorLocation**: file/line/column captured at error construction
//! - **HttpStatusCode**: status codes stored as data, not parsed from messages
//! - **RedactedToken**: bearer tokens and client secrets that never reach logs
//!
//! ## Architecture
//!
//! - **common** (this crate): Error plumbing and secret handling
//! - **models**: Card, query, and price data structures
//! - **client-core**: The pricing form component
//! - **pricing-engine** / **market-data**: Backend pricing pipeline
//! - **pricing-server**: HTTP service wiring the backend together

pub mod error;
pub mod http_status;
pub mod redacted_token;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_token::RedactedToken;
