//! Item summary decoding.
//!
//! Summaries missing a title or a positive price are skipped. Condition arrives
//! either as a plain string or as an object with `conditionDisplayName`.

use crate::ITEM_URL_PREFIX;
use crate::search_filter::format_timestamp;

use models::{ActiveItem, ListingType, SoldItem, lenient};

use chrono::{DateTime, Utc};
use log::debug;
use serde::Deserialize;

pub const UNKNOWN_CONDITION: &str = "Unknown";
const FIXED_PRICE: &str = "FIXED_PRICE";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub item_summaries: Vec<ItemSummary>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Price {
    #[serde(default, deserialize_with = "lenient::number")]
    pub value: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    Text(String),
    Detail {
        #[serde(rename = "conditionDisplayName")]
        display_name: Option<String>,
    },
}

impl Condition {
    fn display(&self) -> Option<&str> {
        match self {
            Condition::Text(text) => Some(text.as_str()),
            Condition::Detail { display_name } => display_name.as_deref(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub condition: Option<Condition>,
    #[serde(default)]
    pub buying_options: Vec<String>,
    #[serde(default)]
    pub item_end_date: Option<String>,
    #[serde(default)]
    pub sold_date: Option<String>,
    #[serde(default)]
    pub item_web_url: Option<String>,
}

impl ItemSummary {
    fn positive_price(&self) -> Option<f64> {
        self.price
            .as_ref()
            .and_then(|price| price.value)
            .filter(|value| *value > 0.0)
    }

    fn condition_display(&self) -> String {
        self.condition
            .as_ref()
            .and_then(Condition::display)
            .filter(|display| !display.trim().is_empty())
            .unwrap_or(UNKNOWN_CONDITION)
            .to_string()
    }

    fn listing_type(&self) -> ListingType {
        if self.buying_options.iter().any(|option| option == FIXED_PRICE) {
            ListingType::BuyItNow
        } else {
            ListingType::Auction
        }
    }

    /// Public item page, from the legacy id inside `v1|<id>|0` when present.
    fn url(&self) -> Option<String> {
        match self.item_id.as_deref() {
            Some(item_id) if !item_id.is_empty() => {
                let legacy_id = item_id.split('|').nth(1).unwrap_or(item_id);
                Some(format!("{ITEM_URL_PREFIX}{legacy_id}"))
            }
            _ => self.item_web_url.clone(),
        }
    }

    fn usable(&self) -> Option<(String, f64)> {
        let title = self.title.as_deref().map(str::trim).unwrap_or_default();
        match self.positive_price() {
            Some(price) if !title.is_empty() => Some((title.to_string(), price)),
            _ => {
                debug!("Skipping item summary {:?}: no title or price", self.item_id);
                None
            }
        }
    }

    /// Sale timestamp: end date, then sold date, then `now`.
    pub fn into_sold(self, now: DateTime<Utc>) -> Option<SoldItem> {
        let (title, price) = self.usable()?;
        let sold_at = self
            .item_end_date
            .clone()
            .or_else(|| self.sold_date.clone())
            .unwrap_or_else(|| format_timestamp(now));

        Some(SoldItem {
            title,
            price,
            condition: self.condition_display(),
            sold_at,
            url: self.url(),
        })
    }

    pub fn into_active(self) -> Option<ActiveItem> {
        let (title, price) = self.usable()?;

        Some(ActiveItem {
            title,
            price,
            condition: self.condition_display(),
            listing_type: self.listing_type(),
            url: self.url(),
        })
    }
}

pub fn sold_items(response: SearchResponse, now: DateTime<Utc>) -> Vec<SoldItem> {
    response
        .item_summaries
        .into_iter()
        .filter_map(|item| item.into_sold(now))
        .collect()
}

pub fn active_items(response: SearchResponse) -> Vec<ActiveItem> {
    response
        .item_summaries
        .into_iter()
        .filter_map(ItemSummary::into_active)
        .collect()
}
