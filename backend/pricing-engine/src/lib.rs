//! Card valuation from marketplace data.
//!
//! Pipeline, per request:
//! 1. [`query::build_search_query`] turns a [`models::CardQuery`] into search text
//! 2. The marketplace returns sold and active items (see the `market-data` crate)
//! 3. [`filters`] drop condition mismatches, excluded title keywords and price outliers
//! 4. [`analysis::analyze_market`] classifies the market
//! 5. [`analysis::predict_price`] produces the valuation and its confidence
//!
//! [`Pricer`] runs steps 3 to 5 and assembles the [`models::PriceResponse`].

pub mod analysis;
pub mod error;
pub mod filters;
pub mod pricer;
pub mod query;
pub mod rules;

#[cfg(test)]
mod tests;

pub use analysis::{Prediction, analyze_market, predict_price};
pub use error::RulesError;
pub use pricer::Pricer;
pub use query::build_search_query;
pub use rules::PricingRules;
