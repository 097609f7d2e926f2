//! Browse API `filter` and `sort` parameters.

use chrono::{DateTime, Duration, Utc};

pub const SOLD_SORT: &str = "-endDate";
pub const ACTIVE_SORT: &str = "price";
pub const ACTIVE_FILTER: &str = "buyingOptions:{FIXED_PRICE|AUCTION}";
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.000Z";

/// Marketplace condition value for a form condition label. Exact, case-sensitive match.
pub fn condition_code(condition: &str) -> Option<&'static str> {
    match condition {
        "New" => Some("NEW"),
        "Like New" => Some("NEW_OTHER"),
        "Excellent" => Some("USED_EXCELLENT"),
        "Very Good" => Some("USED_VERY_GOOD"),
        "Good" => Some("USED_GOOD"),
        "Acceptable" => Some("USED_ACCEPTABLE"),
        "For Parts" => Some("FOR_PARTS"),
        "Ungraded" => Some("UNGRADED"),
        "Graded" => Some("GRADED"),
        _ => None,
    }
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(DATE_FORMAT).to_string()
}

/// `itemEndDate:[start..end]` over the last `window_days`, plus `itemCondition` when the
/// condition has a marketplace code.
pub fn sold_filter(now: DateTime<Utc>, window_days: u32, condition: &str) -> String {
    let start = now - Duration::days(i64::from(window_days));
    let mut filter = format!(
        "itemEndDate:[{}..{}]",
        format_timestamp(start),
        format_timestamp(now)
    );

    if let Some(code) = condition_code(condition.trim()) {
        filter.push_str(",itemCondition:{");
        filter.push_str(code);
        filter.push('}');
    }

    filter
}
