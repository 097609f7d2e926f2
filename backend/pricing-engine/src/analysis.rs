//! Market classification and price prediction.

use crate::filters::Priced;

use models::{ActiveItem, MarketAnalysis, MarketTrend, PriceTrend, SoldItem, SupplyLevel};

const SALE_WEIGHT_FLOOR: f64 = 0.5;
const LISTING_WEIGHT_FLOOR: f64 = 0.7;
const SALE_CONFIDENCE_SAMPLES: f64 = 10.0;
const LISTING_CONFIDENCE_SAMPLES: f64 = 15.0;
const SALE_CONFIDENCE_WEIGHT: f64 = 0.7;
const LISTING_CONFIDENCE_WEIGHT: f64 = 0.3;

/// Predicted price and a 0..=1 confidence, both rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub price: f64,
    pub confidence: f64,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn prices<T: Priced>(items: &[T]) -> Vec<f64> {
    items.iter().map(Priced::price).collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mu = mean(values);
    let variance = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// `count` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Weighted mean with weights falling linearly from 1 to `floor` across the list.
/// Earlier entries count more.
fn weighted_average(values: &[f64], floor: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let weights = linspace(1.0, floor, values.len());
    let total: f64 = weights.iter().sum();
    values
        .iter()
        .zip(&weights)
        .map(|(value, weight)| value * weight)
        .sum::<f64>()
        / total
}

/// Sample-size confidence scaled down by the coefficient of variation.
fn side_confidence(values: &[f64], saturation: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut confidence = (values.len() as f64 / saturation).min(1.0);
    if values.len() > 1 {
        let mu = mean(values);
        let spread = if mu > 0.0 {
            (std_dev(values) / mu).min(1.0)
        } else {
            1.0
        };
        confidence *= 1.0 - spread;
    }
    confidence
}

/// Classify price trend, supply and overall market from sales vs. listings.
pub fn analyze_market(sales: &[SoldItem], listings: &[ActiveItem]) -> MarketAnalysis {
    if sales.is_empty() && listings.is_empty() {
        return MarketAnalysis::unknown();
    }

    let avg_sale = mean(&prices(sales));
    let avg_active = mean(&prices(listings));

    let price_trend = if avg_active > avg_sale * 1.1 {
        PriceTrend::Increasing
    } else if avg_active < avg_sale * 0.9 {
        PriceTrend::Decreasing
    } else {
        PriceTrend::Stable
    };

    let (sale_count, listing_count) = (sales.len() as f64, listings.len() as f64);
    let supply_level = if listing_count > sale_count * 2.0 {
        SupplyLevel::High
    } else if listing_count < sale_count * 0.5 {
        SupplyLevel::Low
    } else {
        SupplyLevel::Moderate
    };

    let market_trend = match (price_trend, supply_level) {
        (PriceTrend::Increasing, SupplyLevel::Low) => MarketTrend::Bullish,
        (PriceTrend::Decreasing, SupplyLevel::High) => MarketTrend::Bearish,
        _ => MarketTrend::Neutral,
    };

    MarketAnalysis {
        market_trend,
        supply_level,
        price_trend,
        average_sale_price: round2(avg_sale),
        average_active_price: round2(avg_active),
        active_listings_count: listings.len(),
        recent_sales_count: sales.len(),
    }
}

/// Weighted valuation adjusted for market direction.
///
/// Sales are expected newest first and listings cheapest first; the first entries
/// carry the most weight.
pub fn predict_price(sales: &[SoldItem], listings: &[ActiveItem]) -> Prediction {
    if sales.is_empty() && listings.is_empty() {
        return Prediction {
            price: 0.0,
            confidence: 0.0,
        };
    }

    let analysis = analyze_market(sales, listings);
    let sale_prices = prices(sales);
    let listing_prices = prices(listings);

    let weighted_sale = weighted_average(&sale_prices, SALE_WEIGHT_FLOOR);
    let weighted_active = weighted_average(&listing_prices, LISTING_WEIGHT_FLOOR);

    let price = match analysis.market_trend {
        MarketTrend::Bullish => weighted_sale.max(weighted_active) * 1.05,
        MarketTrend::Bearish => weighted_sale.min(weighted_active) * 0.95,
        _ if weighted_active > 0.0 => (weighted_sale + weighted_active) / 2.0,
        _ => weighted_sale,
    };

    let confidence = side_confidence(&sale_prices, SALE_CONFIDENCE_SAMPLES) * SALE_CONFIDENCE_WEIGHT
        + side_confidence(&listing_prices, LISTING_CONFIDENCE_SAMPLES)
            * LISTING_CONFIDENCE_WEIGHT;

    Prediction {
        price: round2(price),
        confidence: round2(confidence.clamp(0.0, 1.0)),
    }
}
