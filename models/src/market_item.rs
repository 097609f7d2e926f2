//! Marketplace items as the pricing pipeline sees them: every price is known.

use crate::price_response::{ListingRecord, SaleRecord};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FormatResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingType {
    BuyItNow,
    Auction,
}

impl ListingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::BuyItNow => "buy_it_now",
            ListingType::Auction => "auction",
        }
    }
}

impl Display for ListingType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter.write_str(self.as_str())
    }
}

/// A completed sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoldItem {
    pub title: String,
    pub price: f64,
    pub condition: String,
    /// When the sale ended, ISO 8601.
    pub sold_at: String,
    pub url: Option<String>,
}

/// A live listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveItem {
    pub title: String,
    pub price: f64,
    pub condition: String,
    pub listing_type: ListingType,
    pub url: Option<String>,
}

impl From<SoldItem> for SaleRecord {
    fn from(item: SoldItem) -> Self {
        SaleRecord {
            title: Some(item.title),
            price: Some(item.price),
            condition: Some(item.condition),
            date: Some(item.sold_at),
            url: item.url,
        }
    }
}

impl From<ActiveItem> for ListingRecord {
    fn from(item: ActiveItem) -> Self {
        ListingRecord {
            title: Some(item.title),
            price: Some(item.price),
            condition: Some(item.condition),
            listing_type: Some(item.listing_type.to_string()),
            url: item.url,
        }
    }
}
