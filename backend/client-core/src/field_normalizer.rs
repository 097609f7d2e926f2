//! Response-shape normalization for the pricing endpoint.
//!
//! Backends have answered with camelCase and snake_case keys, and with the market
//! analysis either flat or nested under `market_analysis`. [`normalize_json`] rewrites
//! any of those into the canonical flat camelCase shape before decoding.

use serde_json::{Map, Value};

const NESTED_ANALYSIS_KEY: &str = "marketAnalysis";

/// Map a known non-canonical key to its canonical spelling. Unknown keys pass
/// through unchanged.
pub fn normalize_key(key: &str) -> &str {
    match key {
        "predicted_price" => "predictedPrice",
        "confidence_score" => "confidenceScore",
        "market_trend" => "marketTrend",
        "supply_level" => "supplyLevel",
        "price_trend" => "priceTrend",
        "average_sale_price" | "avg_sale_price" | "avgSalePrice" => "averageSalePrice",
        "average_active_price" | "avg_active_price" | "avgActivePrice" => "averageActivePrice",
        "active_listings_count" => "activeListingsCount",
        "recent_sales_count" => "recentSalesCount",
        "recent_sales" => "recentSales",
        "active_listings" => "activeListings",
        "listing_type" => "listingType",
        "sale_date" => "date",
        "market_analysis" => NESTED_ANALYSIS_KEY,
        other => other,
    }
}

/// Rename keys at every level, then lift a nested market analysis into the top level.
pub fn normalize_json(value: Value) -> Value {
    match normalize_keys(value) {
        Value::Object(map) => Value::Object(flatten_analysis(map)),
        other => other,
    }
}

fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut normalized = Map::with_capacity(map.len());
            for (key, inner) in map {
                let canonical = normalize_key(&key);
                // An already-canonical key wins over an alias of it.
                if canonical != key && normalized.contains_key(canonical) {
                    continue;
                }
                normalized.insert(canonical.to_string(), normalize_keys(inner));
            }
            Value::Object(normalized)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

/// Non-null top-level fields take precedence over the nested copy.
fn flatten_analysis(mut map: Map<String, Value>) -> Map<String, Value> {
    if let Some(Value::Object(nested)) = map.remove(NESTED_ANALYSIS_KEY) {
        for (key, inner) in nested {
            match map.get(&key) {
                Some(existing) if !existing.is_null() => {}
                _ => {
                    map.insert(key, inner);
                }
            }
        }
    }
    map
}
