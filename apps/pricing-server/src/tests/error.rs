use crate::error::{INVALID_CREDENTIALS, ServerError};

use market_data::MarketDataError;
use models::CardQuery;

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;

async fn render(error: ServerError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// **VALUE**: Verifies each error class maps to its status and a JSON body.
///
/// **WHY THIS MATTERS**: The client treats 401 specially (clear session and reload) and
/// everything else as a generic failure. A wrong status breaks that split.
///
/// **BUG THIS CATCHES**: Would catch a marketplace failure surfacing as 401, or internal
/// details (file paths, secrets) leaking into the body.
#[tokio::test]
async fn given_errors_when_rendered_then_status_and_json_body() {
    let (status, body) = render(ServerError::unauthorized()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], INVALID_CREDENTIALS);

    let (status, body) = render(ServerError::bad_request("brand is required")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "brand is required");

    let (status, body) = render(MarketDataError::api(503, "upstream body").into()).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Marketplace request failed (server_error)");

    let (status, body) = render(ServerError::server("disk at /var/secret")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}

#[test]
fn given_invalid_query_when_converted_then_bad_request() {
    let error: ServerError = CardQuery::default().validate().unwrap_err().into();

    assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error.public_message(), "brand is required");
}
