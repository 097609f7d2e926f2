//! Data structures exchanged between the pricing form and the pricing server.
//!
//! The request side ([`CardQuery`]) is produced in one canonical camelCase shape.
//! The response side ([`PriceResponse`] and its rows) is an external contract whose
//! field naming drifted over time, so every field decodes leniently: snake_case
//! aliases, numeric strings, nulls and absent keys are all accepted.

pub mod card_query;
pub mod error;
pub mod lenient;
pub mod market;
pub mod market_item;
pub mod price_response;
pub mod user;

#[cfg(test)]
mod tests;

pub use card_query::builder::CardQueryBuilder;
pub use card_query::{CardQuery, parse_leading_int};
pub use common::ErrorLocation;
pub use error::model_error::ModelError;
pub use market::{MarketAnalysis, MarketTrend, PriceTrend, SupplyLevel};
pub use market_item::{ActiveItem, ListingType, SoldItem};
pub use price_response::{ListingRecord, PriceResponse, SaleRecord};
pub use user::UserProfile;
