//! Integration tests for `ListingsClient::fetch_all`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made. Covers the pagination termination rule (empty
//! page only), the rate-limit retry schedule, and the best-effort
//! partial-results policy.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bottledb_catalog::{CatalogError, FetchConfig, ListingsClient};

/// Builds a `ListingsClient` suitable for tests: 5-second timeout, descriptive UA.
fn test_client() -> ListingsClient {
    ListingsClient::new(5, "bottledb-test/0.1").expect("failed to build test ListingsClient")
}

/// Near-zero delays so tests never sleep for real.
fn test_config(page_size: u32, max_retries: u32) -> FetchConfig {
    FetchConfig {
        page_size,
        inter_request_delay: Duration::ZERO,
        max_retries,
        backoff_base: Duration::from_millis(1),
    }
}

/// Minimal valid listing hit fixture.
fn listing_json(id: &str, name: &str, price: f64) -> serde_json::Value {
    json!({
        "_source": {
            "id": id,
            "name": name,
            "price": price,
            "attributes": {"Producer": "Test Distillery", "Year Bottled": "2015", "ABV": "46%"},
            "imageUrl": format!("https://cdn.example.com/{id}.jpg")
        }
    })
}

fn endpoint(server: &MockServer) -> String {
    format!("{}/api/search/listings", server.uri())
}

async fn mount_page(server: &MockServer, offset: u64, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/search/listings"))
        .and(query_param("from", offset.to_string()))
        .and(query_param("listed", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Termination rule
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_first_page_yields_empty_complete_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/listings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = test_client()
        .fetch_all(&endpoint(&server), &test_config(100, 0))
        .await;

    assert!(outcome.is_complete(), "expected complete outcome");
    assert!(outcome.entries.is_empty());
}

#[tokio::test]
async fn fetch_issues_one_request_per_page_plus_terminating_empty_page() {
    let server = MockServer::start().await;

    // 3 items with page_size 2: ceil(3/2) + 1 = 3 requests total.
    mount_page(
        &server,
        0,
        json!([listing_json("b-1", "One", 1.0), listing_json("b-2", "Two", 2.0)]),
    )
    .await;
    mount_page(&server, 2, json!([listing_json("b-3", "Three", 3.0)])).await;
    mount_page(&server, 4, json!([])).await;

    let outcome = test_client()
        .fetch_all(&endpoint(&server), &test_config(2, 0))
        .await;

    assert!(outcome.is_complete(), "failure: {:?}", outcome.failure);
    assert_eq!(outcome.entries.len(), 3);
    assert_eq!(outcome.entries[0].id, "b-1");
    assert_eq!(outcome.entries[2].id, "b-3");
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn short_page_does_not_terminate_the_fetch() {
    let server = MockServer::start().await;

    // Page 1 is short (1 of 2) but page 2 is full — the loop must keep going
    // until the explicitly empty page at offset 4.
    mount_page(&server, 0, json!([listing_json("b-1", "One", 1.0)])).await;
    mount_page(
        &server,
        2,
        json!([listing_json("b-2", "Two", 2.0), listing_json("b-3", "Three", 3.0)]),
    )
    .await;
    mount_page(&server, 4, json!([])).await;

    let outcome = test_client()
        .fetch_all(&endpoint(&server), &test_config(2, 0))
        .await;

    assert!(outcome.is_complete(), "failure: {:?}", outcome.failure);
    assert_eq!(
        outcome.entries.len(),
        3,
        "short page must not truncate the fetch"
    );
}

#[tokio::test]
async fn null_body_is_treated_as_end_of_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/listings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let outcome = test_client()
        .fetch_all(&endpoint(&server), &test_config(100, 0))
        .await;

    assert!(outcome.is_complete());
    assert!(outcome.entries.is_empty());
}

// ---------------------------------------------------------------------------
// Rate-limit retry schedule
// ---------------------------------------------------------------------------

#[tokio::test]
async fn three_rate_limits_then_success_is_consumed_with_retry_ceiling_three() {
    let server = MockServer::start().await;

    // First three requests for page 0 are 429s, the fourth succeeds.
    Mock::given(method("GET"))
        .and(path("/api/search/listings"))
        .and(query_param("from", "0"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(3)
        .mount(&server)
        .await;
    mount_page(&server, 0, json!([listing_json("b-42", "Answer", 42.0)])).await;
    mount_page(&server, 100, json!([])).await;

    let outcome = test_client()
        .fetch_all(&endpoint(&server), &test_config(100, 3))
        .await;

    assert!(outcome.is_complete(), "failure: {:?}", outcome.failure);
    assert_eq!(outcome.entries.len(), 1);
    assert_eq!(outcome.entries[0].id, "b-42");
    // 4 requests for page 0 + 1 terminating empty page.
    assert_eq!(server.received_requests().await.unwrap().len(), 5);
}

#[tokio::test]
async fn exhausting_the_retry_ceiling_aborts_the_entire_fetch() {
    let server = MockServer::start().await;

    // Page 0 succeeds; page 2 rate-limits forever.
    mount_page(
        &server,
        0,
        json!([listing_json("b-1", "One", 1.0), listing_json("b-2", "Two", 2.0)]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/search/listings"))
        .and(query_param("from", "2"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(3) // 1 initial + 2 retries
        .mount(&server)
        .await;

    let outcome = test_client()
        .fetch_all(&endpoint(&server), &test_config(2, 2))
        .await;

    assert!(
        matches!(outcome.failure, Some(CatalogError::RateLimited { .. })),
        "expected RateLimited abort, got: {:?}",
        outcome.failure
    );
    // Entries from the successful page are preserved.
    assert_eq!(outcome.entries.len(), 2);
}

// ---------------------------------------------------------------------------
// Best-effort partial results on non-retryable failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_error_aborts_immediately_with_partial_results() {
    let server = MockServer::start().await;

    mount_page(&server, 0, json!([listing_json("b-1", "One", 1.0)])).await;
    Mock::given(method("GET"))
        .and(path("/api/search/listings"))
        .and(query_param("from", "2"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1) // no retry for non-429 failures
        .mount(&server)
        .await;

    let outcome = test_client()
        .fetch_all(&endpoint(&server), &test_config(2, 3))
        .await;

    match outcome.failure {
        Some(CatalogError::UnexpectedStatus { status, .. }) => assert_eq!(status, 503),
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
    assert_eq!(outcome.entries.len(), 1, "prior pages must be preserved");
}

#[tokio::test]
async fn malformed_json_aborts_with_deserialize_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/listings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not json"))
        .mount(&server)
        .await;

    let outcome = test_client()
        .fetch_all(&endpoint(&server), &test_config(100, 0))
        .await;

    assert!(
        matches!(outcome.failure, Some(CatalogError::Deserialize { .. })),
        "expected Deserialize abort, got: {:?}",
        outcome.failure
    );
    assert!(outcome.entries.is_empty());
}

// ---------------------------------------------------------------------------
// Normalization within the loop
// ---------------------------------------------------------------------------

#[tokio::test]
async fn listings_with_missing_fields_default_instead_of_failing_the_page() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        0,
        json!([
            {"_source": {"name": "Lonely Bottle"}},
            {"_source": {}},
        ]),
    )
    .await;
    mount_page(&server, 100, json!([])).await;

    let outcome = test_client()
        .fetch_all(&endpoint(&server), &test_config(100, 0))
        .await;

    assert!(outcome.is_complete(), "failure: {:?}", outcome.failure);
    assert_eq!(outcome.entries.len(), 2);
    assert_eq!(outcome.entries[0].name, "Lonely Bottle");
    assert_eq!(outcome.entries[0].producer, "");
    assert!((outcome.entries[1].price - 0.0).abs() < f64::EPSILON);
}
