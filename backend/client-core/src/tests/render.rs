use crate::render::{PLACEHOLDER, format_currency, format_percent, render_results};
use crate::view::{ListRow, NO_DATA_TEXT};

use models::{ListingRecord, PriceResponse, SaleRecord};

/// **VALUE**: Verifies currency and percent formatting.
///
/// **WHY THIS MATTERS**: These are the two numbers users read first. `12.5` must show as
/// `$12.50` and `0.873` as `87.3%`.
///
/// **BUG THIS CATCHES**: Would catch precision changes or a missing `$` / `%`.
#[test]
fn given_numbers_when_formatted_then_match_display_rules() {
    assert_eq!(format_currency(12.5), "$12.50");
    assert_eq!(format_currency(0.0), "$0.00");
    assert_eq!(format_currency(1234.567), "$1234.57");
    assert_eq!(format_percent(0.873), "87.3%");
    assert_eq!(format_percent(1.0), "100.0%");
    assert_eq!(format_percent(0.0), "0.0%");
}

/// **VALUE**: Verifies a full response renders every text node and one row per record.
///
/// **WHY THIS MATTERS**: This is the happy path of the whole page.
///
/// **BUG THIS CATCHES**: Would catch if a row loses its type-specific field or price formatting.
#[test]
fn given_complete_response_when_rendered_then_all_nodes_populated() {
    // GIVEN: A complete response
    let response = PriceResponse {
        predicted_price: Some(12.5),
        confidence_score: Some(0.873),
        market_trend: Some(String::from("bullish")),
        supply_level: Some(String::from("low")),
        price_trend: Some(String::from("increasing")),
        average_sale_price: Some(11.0),
        average_active_price: None,
        recent_sales: vec![
            SaleRecord {
                title: Some(String::from("2020 Prizm Herbert")),
                price: Some(11.0),
                condition: Some(String::from("PSA 10")),
                date: Some(String::from("2024-05-01")),
                url: None,
            },
            SaleRecord {
                price: Some(9.0),
                ..SaleRecord::default()
            },
        ],
        active_listings: vec![ListingRecord {
            title: Some(String::from("Herbert Prizm")),
            price: Some(14.0),
            condition: Some(String::from("Raw")),
            listing_type: Some(String::from("auction")),
            url: Some(String::from("https://www.ebay.com/itm/1")),
        }],
        ..PriceResponse::default()
    };

    // WHEN: Rendering
    let view = render_results(&response);

    // THEN: Text nodes and rows
    assert_eq!(view.predicted_price, "$12.50");
    assert_eq!(view.confidence_score, "87.3%");
    assert_eq!(view.market_trend, "bullish");
    assert_eq!(view.average_sale_price, "$11.00");
    assert_eq!(view.average_active_price, PLACEHOLDER);
    assert_eq!(view.recent_sales.count, 2);
    assert_eq!(
        view.recent_sales.rows[0].cells(),
        vec!["2020 Prizm Herbert", "$11.00", "PSA 10", "2024-05-01"]
    );
    assert_eq!(view.recent_sales.rows[1].cells(), vec!["-", "$9.00", "-", "-"]);
    assert_eq!(
        view.active_listings.rows[0].cells(),
        vec!["Herbert Prizm", "$14.00", "Raw", "auction"]
    );
}

/// **VALUE**: Verifies empty lists render exactly one placeholder row and a zero count.
///
/// **WHY THIS MATTERS**: A rare card often has no sales. The section must say so instead
/// of rendering nothing.
///
/// **BUG THIS CATCHES**: Would catch if the placeholder counts as a record or is duplicated.
#[test]
fn given_empty_lists_when_rendered_then_single_placeholder_row() {
    // GIVEN: A response with no rows and a misleading header count
    let response = PriceResponse {
        recent_sales_count: Some(12),
        ..PriceResponse::default()
    };

    // WHEN: Rendering
    let view = render_results(&response);

    // THEN: One placeholder, count from records
    assert_eq!(view.recent_sales.rows, vec![ListRow::Placeholder]);
    assert_eq!(view.recent_sales.rows[0].cells(), vec![NO_DATA_TEXT]);
    assert_eq!(view.recent_sales.count, 0);
    assert_eq!(view.active_listings.count, 0);
}

#[test]
fn given_missing_scalars_when_rendered_then_placeholders_shown() {
    let view = render_results(&PriceResponse::default());

    assert_eq!(view.predicted_price, PLACEHOLDER);
    assert_eq!(view.confidence_score, PLACEHOLDER);
    assert_eq!(view.market_trend, PLACEHOLDER);
    assert_eq!(view.supply_level, PLACEHOLDER);
    assert_eq!(view.price_trend, PLACEHOLDER);
}
