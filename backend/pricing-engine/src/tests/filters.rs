use super::fixtures::{active, active_at_prices, sold, sold_at_prices};
use crate::filters::{
    condition_matches, filter_by_condition, filter_by_title_keywords, filter_price_outliers,
    percentile, remove_listing_duplicates,
};

use models::SoldItem;

fn prices(items: &[SoldItem]) -> Vec<f64> {
    items.iter().map(|item| item.price).collect()
}

/// **VALUE**: Verifies the condition matching table.
///
/// **WHY THIS MATTERS**: A raw card and a slabbed card of the same player differ in price
/// by an order of magnitude. Mixing them ruins the prediction.
///
/// **BUG THIS CATCHES**: Would catch "ungraded" admitting "PSA Graded" listings, or case
/// sensitivity creeping in.
#[test]
fn given_condition_requests_when_matching_then_follows_grading_rules() {
    // Blank request matches anything
    assert!(condition_matches("", "Graded"));
    assert!(condition_matches("  ", "whatever"));

    // Ungraded
    assert!(condition_matches("Ungraded", "Used"));
    assert!(condition_matches("ungraded", "UNGRADED"));
    assert!(!condition_matches("Ungraded", "Graded"));

    // Graded
    assert!(condition_matches("Graded", "graded"));
    assert!(!condition_matches("graded", "Near Mint"));

    // Everything else is exact
    assert!(condition_matches("Near Mint", "near mint"));
    assert!(!condition_matches("Near Mint", "Near Mint or Better"));
}

#[test]
fn given_mixed_conditions_when_filtering_then_only_matches_remain() {
    let items = vec![
        sold("A", 10.0, "Ungraded"),
        sold("B", 90.0, "Graded"),
        sold("C", 12.0, "Used"),
    ];

    let kept = filter_by_condition(items, "ungraded");

    let titles: Vec<&str> = kept.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "C"]);
}

/// **VALUE**: Verifies keyword exclusion is case-insensitive substring matching.
///
/// **WHY THIS MATTERS**: "LOT of 25 Prizm" sells for the lot, not the card.
///
/// **BUG THIS CATCHES**: Would catch exact-word or case-sensitive matching.
#[test]
fn given_lot_listings_when_filtering_keywords_then_lots_removed() {
    // GIVEN: One lot, one pick-your-card, one real card
    let items = vec![
        active("2020 Prizm LOT of 25", 40.0, "Ungraded"),
        active("Pick Your Card - 2020 Prizm", 2.0, "Ungraded"),
        active("2020 Prizm Justin Herbert", 15.0, "Ungraded"),
    ];
    let keywords = vec![String::from("lot"), String::from("pick your card")];

    // WHEN: Filtering
    let kept = filter_by_title_keywords(items, &keywords);

    // THEN: Only the single card survives
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].title, "2020 Prizm Justin Herbert");
}

#[test]
fn given_no_keywords_when_filtering_then_items_unchanged() {
    let items = sold_at_prices(&[1.0, 2.0]);
    assert_eq!(filter_by_title_keywords(items.clone(), &[]), items);
}

#[test]
fn given_sorted_values_when_taking_percentiles_then_interpolates() {
    let values = [1.0, 2.0, 3.0, 4.0];

    assert_eq!(percentile(&values, 0.0), 1.0);
    assert_eq!(percentile(&values, 25.0), 1.75);
    assert_eq!(percentile(&values, 50.0), 2.5);
    assert_eq!(percentile(&values, 100.0), 4.0);
    assert_eq!(percentile(&[7.0], 25.0), 7.0);
    assert_eq!(percentile(&[], 25.0), 0.0);
}

/// **VALUE**: Verifies a single extreme price is removed by the 1.5·IQR rule.
///
/// **WHY THIS MATTERS**: A mislabeled graded copy in a raw search drags the average far up.
///
/// **BUG THIS CATCHES**: Would catch wrong quartile math or inverted bounds.
#[test]
fn given_one_extreme_price_when_filtering_outliers_then_it_is_dropped() {
    // GIVEN: Q1=11, Q3=13, bounds [8, 16]
    let items = sold_at_prices(&[10.0, 11.0, 12.0, 13.0, 100.0]);

    // WHEN
    let kept = filter_price_outliers(items);

    // THEN
    assert_eq!(prices(&kept), vec![10.0, 11.0, 12.0, 13.0]);
}

/// **VALUE**: Verifies small samples bypass outlier removal.
///
/// **BUG THIS CATCHES**: Would catch quartiles computed on three points discarding real sales.
#[test]
fn given_fewer_than_four_items_when_filtering_outliers_then_unchanged() {
    let items = sold_at_prices(&[1.0, 50.0, 1000.0]);

    let kept = filter_price_outliers(items.clone());

    assert_eq!(kept, items);
}

/// **VALUE**: Verifies a zero IQR keeps only the cluster and two outliers go at once.
///
/// **WHY THIS MATTERS**: Common cards sell at one price over and over; IQR collapses to 0.
///
/// **BUG THIS CATCHES**: Would catch a zero-width range dropping the cluster itself.
#[test]
fn given_identical_cluster_when_filtering_outliers_then_cluster_kept() {
    // GIVEN: Q1=10, Q3=10, bounds [10, 10]
    let items = sold_at_prices(&[10.0, 10.0, 10.0, 10.0, 5.0, 30.0]);
    let kept = filter_price_outliers(items);
    assert_eq!(prices(&kept), vec![10.0, 10.0, 10.0, 10.0]);

    // GIVEN: Q1=1.75, Q3=39.25, bounds [-54.5, 95.5]; 100 and 120 go
    let items = sold_at_prices(&[1.0, 1.0, 2.0, 3.0, 18.0, 19.0, 100.0, 120.0]);
    let kept = filter_price_outliers(items);
    assert_eq!(prices(&kept), vec![1.0, 1.0, 2.0, 3.0, 18.0, 19.0]);
}

/// **VALUE**: Verifies listings mirroring a sale are dropped.
///
/// **WHY THIS MATTERS**: Ended listings can linger in active search for a short while and
/// would be counted twice.
///
/// **BUG THIS CATCHES**: Would catch case-sensitive titles or exact float comparison.
#[test]
fn given_listing_matching_sale_when_deduplicating_then_listing_removed() {
    // GIVEN: One listing mirrors a sale, one does not
    let sales = vec![sold("2020 Prizm Herbert", 10.0, "Ungraded")];
    let listings = vec![
        active("2020 PRIZM HERBERT", 10.005, "Ungraded"),
        active("2020 Prizm Herbert RC", 15.0, "Ungraded"),
    ];

    // WHEN
    let kept = remove_listing_duplicates(listings, &sales);

    // THEN
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].title, "2020 Prizm Herbert RC");
}

/// **VALUE**: Verifies deduplication never empties the listing set.
///
/// **BUG THIS CATCHES**: Would catch the fallback to the original list being lost.
#[test]
fn given_every_listing_matches_when_deduplicating_then_original_kept() {
    let sales = vec![sold("Listing 0", 10.0, "Ungraded")];
    let listings = active_at_prices(&[10.0]);

    let kept = remove_listing_duplicates(listings.clone(), &sales);

    assert_eq!(kept, listings);
}
