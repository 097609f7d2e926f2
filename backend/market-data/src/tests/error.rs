use crate::error::MarketDataError;

/// **VALUE**: Verifies which failures the search loop retries.
///
/// **WHY THIS MATTERS**: Retrying a 400 wastes the rate budget; not retrying a 503 turns
/// a momentary outage into a failed price request.
///
/// **BUG THIS CATCHES**: Would catch 4xx codes being retried or gateway codes not.
#[test]
fn given_errors_when_checking_retryable_then_only_transient() {
    assert!(MarketDataError::api(503, "unavailable").is_retryable());
    assert!(MarketDataError::api(429, "slow down").is_retryable());
    assert!(!MarketDataError::api(400, "bad filter").is_retryable());
    assert!(!MarketDataError::auth(401, "invalid_client").is_retryable());
    assert!(!MarketDataError::config("missing").is_retryable());
}

#[test]
fn given_errors_when_categorizing_then_stable_labels() {
    assert_eq!(MarketDataError::api(500, "").error_category(), "server_error");
    assert_eq!(MarketDataError::api(404, "").error_category(), "client_error");
    assert_eq!(MarketDataError::auth(401, "").error_category(), "auth");
    assert_eq!(MarketDataError::auth(401, "").status_code(), Some(401));
    assert_eq!(MarketDataError::config("x").status_code(), None);
}

#[test]
fn given_api_error_when_displayed_then_includes_status_and_location() {
    let error = MarketDataError::api(502, "bad gateway");

    let text = error.to_string();

    assert!(text.starts_with("Marketplace API Error: HTTP 502 - bad gateway"));
    assert!(text.contains("error.rs"));
}
