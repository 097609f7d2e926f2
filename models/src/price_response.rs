use crate::lenient;
use crate::market::MarketAnalysis;

use serde::{Deserialize, Serialize};

/// A completed sale backing the valuation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub condition: Option<String>,
    #[serde(default, alias = "sale_date", deserialize_with = "lenient::text")]
    pub date: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::text"
    )]
    pub url: Option<String>,
}

/// A live marketplace listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub condition: Option<String>,
    #[serde(default, alias = "listing_type", deserialize_with = "lenient::text")]
    pub listing_type: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::text"
    )]
    pub url: Option<String>,
}

/// Valuation returned by `POST /api/price`.
///
/// Every field is optional on the way in. Consumers render what is present and
/// fall back to placeholders for the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    #[serde(default, alias = "predicted_price", deserialize_with = "lenient::number")]
    pub predicted_price: Option<f64>,
    #[serde(default, alias = "confidence_score", deserialize_with = "lenient::number")]
    pub confidence_score: Option<f64>,
    #[serde(default, alias = "market_trend", deserialize_with = "lenient::text")]
    pub market_trend: Option<String>,
    #[serde(default, alias = "supply_level", deserialize_with = "lenient::text")]
    pub supply_level: Option<String>,
    #[serde(default, alias = "price_trend", deserialize_with = "lenient::text")]
    pub price_trend: Option<String>,
    #[serde(
        default,
        alias = "average_sale_price",
        alias = "avg_sale_price",
        alias = "avgSalePrice",
        deserialize_with = "lenient::number"
    )]
    pub average_sale_price: Option<f64>,
    #[serde(
        default,
        alias = "average_active_price",
        alias = "avg_active_price",
        alias = "avgActivePrice",
        deserialize_with = "lenient::number"
    )]
    pub average_active_price: Option<f64>,
    #[serde(default, alias = "active_listings_count", deserialize_with = "lenient::count")]
    pub active_listings_count: Option<u64>,
    #[serde(default, alias = "recent_sales_count", deserialize_with = "lenient::count")]
    pub recent_sales_count: Option<u64>,
    #[serde(default, alias = "recent_sales", deserialize_with = "lenient::records")]
    pub recent_sales: Vec<SaleRecord>,
    #[serde(default, alias = "active_listings", deserialize_with = "lenient::records")]
    pub active_listings: Vec<ListingRecord>,
}

impl PriceResponse {
    /// Assemble a response from engine output.
    pub fn from_analysis(
        predicted_price: f64,
        confidence_score: f64,
        analysis: &MarketAnalysis,
        recent_sales: Vec<SaleRecord>,
        active_listings: Vec<ListingRecord>,
    ) -> Self {
        Self {
            predicted_price: Some(predicted_price),
            confidence_score: Some(confidence_score),
            market_trend: Some(analysis.market_trend.to_string()),
            supply_level: Some(analysis.supply_level.to_string()),
            price_trend: Some(analysis.price_trend.to_string()),
            average_sale_price: Some(analysis.average_sale_price),
            average_active_price: Some(analysis.average_active_price),
            active_listings_count: Some(analysis.active_listings_count as u64),
            recent_sales_count: Some(analysis.recent_sales_count as u64),
            recent_sales,
            active_listings,
        }
    }
}
