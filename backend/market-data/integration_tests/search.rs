use crate::helpers::{APP_TOKEN, client_for, mount_token, search_body, search_path};

use market_data::{DEFAULT_MARKETPLACE_ID, MARKETPLACE_HEADER, MarketDataError};

use std::collections::HashMap;

use wiremock::matchers::{header, method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the sold search parameters and headers end to end.
///
/// **WHY THIS MATTERS**: Sort order feeds the recency weighting in the price prediction;
/// the condition filter narrows the marketplace results before local filtering.
///
/// **BUG THIS CATCHES**: Would catch a wrong sort, a missing marketplace header, or the
/// condition code not reaching the filter.
#[tokio::test]
async fn given_query_when_searching_sold_then_sends_window_condition_and_sort() {
    // GIVEN
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("GET"))
        .and(search_path())
        .and(header("authorization", format!("Bearer {APP_TOKEN}").as_str()))
        .and(header(MARKETPLACE_HEADER, DEFAULT_MARKETPLACE_ID))
        .and(query_param("q", "Panini Prizm 2020"))
        .and(query_param("sort", "-endDate"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&["10.00", "12.00"])))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN
    let items = client_for(&server)
        .search_sold("Panini Prizm 2020", "Ungraded")
        .await
        .unwrap();

    // THEN: Decoded in order
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].price, 10.0);
    assert_eq!(items[0].url.as_deref(), Some("https://www.ebay.com/itm/100"));

    // AND: The filter carries the date window and the condition code
    let requests = server.received_requests().await.unwrap();
    let search = requests
        .iter()
        .find(|request| request.url.path().ends_with("/search"))
        .unwrap();
    let params: HashMap<_, _> = search.url.query_pairs().into_owned().collect();
    let filter = &params["filter"];
    assert!(filter.starts_with("itemEndDate:["));
    assert!(filter.ends_with(",itemCondition:{UNGRADED}"));
}

/// **VALUE**: Verifies active searches ask for both listing types sorted by price, and
/// the token is fetched once for several searches.
///
/// **BUG THIS CATCHES**: Would catch a token request per search (the token mock expects
/// exactly one call).
#[tokio::test]
async fn given_two_searches_when_searching_active_then_token_reused() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("GET"))
        .and(search_path())
        .and(query_param("filter", "buyingOptions:{FIXED_PRICE|AUCTION}"))
        .and(query_param("sort", "price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&["15.00"])))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let first = client.search_active("Prizm").await.unwrap();
    let second = client.search_active("Prizm").await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
}

/// **VALUE**: Verifies a transient 503 is retried with backoff.
///
/// **WHY THIS MATTERS**: The marketplace sheds load with 503s; one should not fail a
/// user's price request.
///
/// **BUG THIS CATCHES**: Would catch the retry loop returning the first error.
#[tokio::test]
async fn given_transient_unavailable_when_searching_then_retried() {
    // GIVEN: One 503, then success
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("GET"))
        .and(search_path())
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(search_path())
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&["9.99"])))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN
    let items = client_for(&server).search_active("Prizm").await.unwrap();

    // THEN
    assert_eq!(items[0].price, 9.99);
}

/// **VALUE**: Verifies a 400 is returned immediately with its body.
///
/// **BUG THIS CATCHES**: Would catch client errors being retried (the mock expects one
/// call) or the body being lost.
#[tokio::test]
async fn given_bad_request_when_searching_then_api_error_without_retry() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("GET"))
        .and(search_path())
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid filter"))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).search_sold("Prizm", "").await;

    match result {
        Err(error @ MarketDataError::Api { .. }) => {
            assert_eq!(error.status_code(), Some(400));
            assert!(error.to_string().contains("invalid filter"));
        }
        other => panic!("expected api error, got {other:?}"),
    }
}
