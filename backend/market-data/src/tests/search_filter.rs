use crate::search_filter::{condition_code, format_timestamp, sold_filter};

use chrono::{TimeZone, Utc};

#[test]
fn given_form_conditions_when_mapping_then_marketplace_codes() {
    assert_eq!(condition_code("Ungraded"), Some("UNGRADED"));
    assert_eq!(condition_code("Like New"), Some("NEW_OTHER"));
    assert_eq!(condition_code("For Parts"), Some("FOR_PARTS"));
    assert_eq!(condition_code("PSA 10"), None);
    assert_eq!(condition_code("ungraded"), None);
}

/// **VALUE**: Verifies the sold window spans exactly the configured days with
/// millisecond-suffixed UTC timestamps.
///
/// **WHY THIS MATTERS**: The marketplace rejects other timestamp shapes with a 400, which
/// fails every pricing request.
///
/// **BUG THIS CATCHES**: Would catch a local-time format or an off-by-one window.
#[test]
fn given_known_condition_when_building_sold_filter_then_window_and_condition() {
    // GIVEN: A fixed clock
    let now = Utc.with_ymd_and_hms(2024, 6, 30, 15, 4, 5).unwrap();

    // WHEN
    let filter = sold_filter(now, 90, "Ungraded");

    // THEN
    assert_eq!(
        filter,
        "itemEndDate:[2024-04-01T15:04:05.000Z..2024-06-30T15:04:05.000Z],itemCondition:{UNGRADED}"
    );
}

#[test]
fn given_unmapped_condition_when_building_sold_filter_then_date_only() {
    let now = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();

    let filter = sold_filter(now, 7, "PSA 9");

    assert_eq!(
        filter,
        "itemEndDate:[2024-01-03T00:00:00.000Z..2024-01-10T00:00:00.000Z]"
    );
    assert_eq!(format_timestamp(now), "2024-01-10T00:00:00.000Z");
}
