use crate::items::{SearchResponse, UNKNOWN_CONDITION, active_items, sold_items};

use models::ListingType;

use chrono::{TimeZone, Utc};
use serde_json::json;

fn decode(value: serde_json::Value) -> SearchResponse {
    serde_json::from_value(value).unwrap()
}

/// **VALUE**: Verifies both condition shapes, the date fallbacks and the item URL.
///
/// **WHY THIS MATTERS**: The marketplace has returned condition as a string and as an
/// object over time; the condition filter compares against whichever text comes out.
///
/// **BUG THIS CATCHES**: Would catch one shape decoding as "Unknown", the raw `v1|..|0`
/// id leaking into links, or a missing end date dropping the sale.
#[test]
fn given_mixed_summaries_when_decoding_sold_then_normalized() {
    // GIVEN: Three usable sales in different shapes
    let now = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
    let response = decode(json!({
        "total": 3,
        "itemSummaries": [
            {
                "itemId": "v1|123456|0",
                "title": "2020 Prizm Herbert",
                "price": {"value": "12.50", "currency": "USD"},
                "condition": "Ungraded",
                "itemEndDate": "2024-06-01T10:00:00.000Z"
            },
            {
                "itemId": "v1|777|0",
                "title": "2020 Prizm Herbert PSA 10",
                "price": {"value": 80},
                "condition": {"conditionDisplayName": "Graded", "conditionId": "2750"},
                "soldDate": "2024-05-20T08:00:00.000Z"
            },
            {
                "title": "2020 Prizm Herbert RC",
                "price": {"value": "9"},
                "itemWebUrl": "https://www.ebay.com/itm/999"
            }
        ]
    }));

    // WHEN
    let items = sold_items(response, now);

    // THEN
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].price, 12.5);
    assert_eq!(items[0].condition, "Ungraded");
    assert_eq!(items[0].sold_at, "2024-06-01T10:00:00.000Z");
    assert_eq!(items[0].url.as_deref(), Some("https://www.ebay.com/itm/123456"));

    assert_eq!(items[1].condition, "Graded");
    assert_eq!(items[1].sold_at, "2024-05-20T08:00:00.000Z");

    assert_eq!(items[2].condition, UNKNOWN_CONDITION);
    assert_eq!(items[2].sold_at, "2024-06-30T12:00:00.000Z");
    assert_eq!(items[2].url.as_deref(), Some("https://www.ebay.com/itm/999"));
}

/// **VALUE**: Verifies unusable summaries are skipped instead of failing the search.
///
/// **BUG THIS CATCHES**: Would catch a zero price entering the averages or one bad entry
/// aborting the whole decode.
#[test]
fn given_unusable_summaries_when_decoding_then_skipped() {
    let response = decode(json!({
        "itemSummaries": [
            {"title": "No price"},
            {"title": "Zero", "price": {"value": "0.00"}},
            {"title": "Bad", "price": {"value": "n/a"}},
            {"price": {"value": "5"}},
            "not an object",
            {"title": "Good", "price": {"value": "5"}, "buyingOptions": ["AUCTION"]}
        ]
    }));

    let items = active_items(response);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Good");
    assert_eq!(items[0].listing_type, ListingType::Auction);
}

#[test]
fn given_fixed_price_option_when_decoding_active_then_buy_it_now() {
    let response = decode(json!({
        "itemSummaries": [
            {"title": "BIN", "price": {"value": "15"}, "buyingOptions": ["FIXED_PRICE", "BEST_OFFER"]}
        ]
    }));

    let items = active_items(response);

    assert_eq!(items[0].listing_type, ListingType::BuyItNow);
}

#[test]
fn given_empty_body_when_decoding_then_no_items() {
    assert!(active_items(decode(json!({}))).is_empty());
    assert!(sold_items(decode(json!({"itemSummaries": null})), Utc::now()).is_empty());
}
