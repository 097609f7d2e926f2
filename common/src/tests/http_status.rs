use crate::HttpStatusCode;

/// **VALUE**: Verifies status categorization used by retry and session-expiry logic.
///
/// **WHY THIS MATTERS**: The client clears the persisted session only on 401, and the
/// marketplace client retries only transient codes. Mis-categorizing either silently
/// logs users out or hammers a failing upstream.
///
/// **BUG THIS CATCHES**: Would catch if range checks or the retryable set drift.
#[test]
fn given_status_codes_when_categorized_then_matches_http_semantics() {
    // GIVEN / WHEN / THEN
    assert!(HttpStatusCode(401).is_unauthorized());
    assert!(HttpStatusCode(401).is_client_error());
    assert!(!HttpStatusCode(403).is_unauthorized());
    assert!(HttpStatusCode(500).is_server_error());
    assert!(!HttpStatusCode(500).is_retryable());
    assert!(HttpStatusCode(503).is_retryable());
    assert!(HttpStatusCode(429).is_retryable());
    assert!(!HttpStatusCode(404).is_retryable());
}

#[test]
fn given_u16_when_converted_then_displays_as_number() {
    let status: HttpStatusCode = 418.into();

    assert_eq!(status.to_string(), "418");
}
