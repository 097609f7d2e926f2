use models::{ActiveItem, ListingType, SoldItem};

pub fn sold(title: &str, price: f64, condition: &str) -> SoldItem {
    SoldItem {
        title: title.to_string(),
        price,
        condition: condition.to_string(),
        sold_at: String::from("2024-05-01T12:00:00.000Z"),
        url: None,
    }
}

pub fn active(title: &str, price: f64, condition: &str) -> ActiveItem {
    ActiveItem {
        title: title.to_string(),
        price,
        condition: condition.to_string(),
        listing_type: ListingType::BuyItNow,
        url: None,
    }
}

pub fn sold_at_prices(prices: &[f64]) -> Vec<SoldItem> {
    prices
        .iter()
        .enumerate()
        .map(|(i, price)| sold(&format!("Card {i}"), *price, "Ungraded"))
        .collect()
}

pub fn active_at_prices(prices: &[f64]) -> Vec<ActiveItem> {
    prices
        .iter()
        .enumerate()
        .map(|(i, price)| active(&format!("Listing {i}"), *price, "Ungraded"))
        .collect()
}
