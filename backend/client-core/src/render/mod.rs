//! Response-to-view mapping.
//!
//! Nothing here fails: absent or malformed values become [`PLACEHOLDER`].

use crate::view::{ListRow, ListSection, ListingRow, ResultsView, SaleRow};

use models::{ListingRecord, PriceResponse, SaleRecord};

pub const PLACEHOLDER: &str = "-";
pub const RECENT_SALES_TITLE: &str = "Recent Sales";
pub const ACTIVE_LISTINGS_TITLE: &str = "Active Listings";

/// `12.5` → `$12.50`.
pub fn format_currency(value: f64) -> String {
    format!("${:.2}", value)
}

/// `0.873` → `87.3%`.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

fn currency_or_placeholder(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), format_currency)
}

fn text_or_placeholder(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn render_results(response: &PriceResponse) -> ResultsView {
    ResultsView {
        predicted_price: currency_or_placeholder(response.predicted_price),
        confidence_score: response
            .confidence_score
            .map_or_else(|| PLACEHOLDER.to_string(), format_percent),
        market_trend: text_or_placeholder(response.market_trend.as_deref()),
        supply_level: text_or_placeholder(response.supply_level.as_deref()),
        price_trend: text_or_placeholder(response.price_trend.as_deref()),
        average_sale_price: currency_or_placeholder(response.average_sale_price),
        average_active_price: currency_or_placeholder(response.average_active_price),
        recent_sales: render_sales(&response.recent_sales),
        active_listings: render_listings(&response.active_listings),
    }
}

pub fn render_sales(sales: &[SaleRecord]) -> ListSection {
    let rows = sales
        .iter()
        .map(|sale| {
            ListRow::Sale(SaleRow {
                title: text_or_placeholder(sale.title.as_deref()),
                price: currency_or_placeholder(sale.price),
                condition: text_or_placeholder(sale.condition.as_deref()),
                date: text_or_placeholder(sale.date.as_deref()),
                url: sale.url.clone(),
            })
        })
        .collect();

    ListSection::new(RECENT_SALES_TITLE, rows)
}

pub fn render_listings(listings: &[ListingRecord]) -> ListSection {
    let rows = listings
        .iter()
        .map(|listing| {
            ListRow::Listing(ListingRow {
                title: text_or_placeholder(listing.title.as_deref()),
                price: currency_or_placeholder(listing.price),
                condition: text_or_placeholder(listing.condition.as_deref()),
                listing_type: text_or_placeholder(listing.listing_type.as_deref()),
                url: listing.url.clone(),
            })
        })
        .collect();

    ListSection::new(ACTIVE_LISTINGS_TITLE, rows)
}
