//! Market classification produced by the pricing engine.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FormatResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTrend {
    Increasing,
    Decreasing,
    Stable,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplyLevel {
    High,
    Low,
    Moderate,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketTrend {
    Bullish,
    Bearish,
    Neutral,
    Unknown,
}

impl PriceTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTrend::Increasing => "increasing",
            PriceTrend::Decreasing => "decreasing",
            PriceTrend::Stable => "stable",
            PriceTrend::Unknown => "unknown",
        }
    }
}

impl SupplyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplyLevel::High => "high",
            SupplyLevel::Low => "low",
            SupplyLevel::Moderate => "moderate",
            SupplyLevel::Unknown => "unknown",
        }
    }
}

impl MarketTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketTrend::Bullish => "bullish",
            MarketTrend::Bearish => "bearish",
            MarketTrend::Neutral => "neutral",
            MarketTrend::Unknown => "unknown",
        }
    }
}

impl Display for PriceTrend {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter.write_str(self.as_str())
    }
}

impl Display for SupplyLevel {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter.write_str(self.as_str())
    }
}

impl Display for MarketTrend {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter.write_str(self.as_str())
    }
}

/// Summary of recent sales against current listings.
///
/// Averages are rounded to two decimals and are `0.0` when the side has no data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub market_trend: MarketTrend,
    pub supply_level: SupplyLevel,
    pub price_trend: PriceTrend,
    pub average_sale_price: f64,
    pub average_active_price: f64,
    pub active_listings_count: usize,
    pub recent_sales_count: usize,
}

impl MarketAnalysis {
    /// Analysis for a search that returned nothing.
    pub fn unknown() -> Self {
        Self {
            market_trend: MarketTrend::Unknown,
            supply_level: SupplyLevel::Unknown,
            price_trend: PriceTrend::Unknown,
            average_sale_price: 0.0,
            average_active_price: 0.0,
            active_listings_count: 0,
            recent_sales_count: 0,
        }
    }
}
