//! Integration tests for `NominatimClient` as a `PlaceSearch` provider.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tastetrail_core::Coordinate;
use tastetrail_engine::{NominatimClient, PlaceSearch, ProviderError, SearchArea};

const BERLIN: Coordinate = Coordinate::new(52.5200, 13.4050);

/// Builds a `NominatimClient` against `server`: 5-second timeout, no retries.
fn test_client(server: &MockServer) -> NominatimClient {
    NominatimClient::new(&server.uri(), 5, "tastetrail-test/0.1", 0, 0)
        .expect("failed to build test NominatimClient")
}

fn area() -> SearchArea {
    SearchArea::square(BERLIN, 500.0)
}

fn curry_36() -> serde_json::Value {
    json!({
        "place_id": 1,
        "lat": "52.4934",
        "lon": "13.3880",
        "category": "amenity",
        "type": "fast_food",
        "name": "Curry 36",
        "display_name": "Curry 36, 36, Mehringdamm, Kreuzberg, Berlin, 10961, Deutschland",
        "address": {"road": "Mehringdamm", "house_number": "36", "city": "Berlin"},
        "extratags": {"website": "https://curry36.de"}
    })
}

// ---------------------------------------------------------------------------
// Happy paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_maps_items_to_candidates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Restaurant"))
        .and(query_param("format", "jsonv2"))
        .and(query_param("bounded", "1"))
        .and(query_param("addressdetails", "1"))
        .and(query_param("extratags", "1"))
        .and(query_param("limit", "40"))
        .and(header("user-agent", "tastetrail-test/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([curry_36()])))
        .expect(1)
        .mount(&server)
        .await;

    let candidates = test_client(&server)
        .search("Restaurant", &area())
        .await
        .expect("search should succeed");

    assert_eq!(candidates.len(), 1);
    let curry = &candidates[0];
    assert_eq!(curry.name, "Curry 36");
    assert_eq!(curry.coordinate, Coordinate::new(52.4934, 13.3880));
    assert_eq!(curry.category.as_deref(), Some("fast_food"));
    assert_eq!(curry.address.as_deref(), Some("Mehringdamm 36, Berlin"));
    assert_eq!(curry.website_url.as_deref(), Some("https://curry36.de"));
}

#[tokio::test]
async fn empty_response_is_an_empty_vec() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let candidates = test_client(&server).search("Restaurant", &area()).await;
    assert!(candidates.is_ok(), "expected Ok, got: {candidates:?}");
    assert!(candidates.unwrap().is_empty());
}

#[tokio::test]
async fn unusable_items_are_skipped() {
    let server = MockServer::start().await;

    let body = json!([
        curry_36(),
        {"lat": "not-a-number", "lon": "13.4", "name": "Broken"},
        {"lat": "52.5", "lon": "13.4", "name": "", "display_name": ""}
    ]);
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let candidates = test_client(&server)
        .search("Restaurant", &area())
        .await
        .unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].name, "Curry 36");
}

#[tokio::test]
async fn base_url_with_path_prefix_is_respected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nominatim/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([curry_36()])))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/nominatim/", server.uri());
    let client = NominatimClient::new(&base, 5, "tastetrail-test/0.1", 0, 0).unwrap();
    let candidates = client.search("Restaurant", &area()).await.unwrap();
    assert_eq!(candidates.len(), 1);
}

// ---------------------------------------------------------------------------
// Errors and retries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rate_limit_surfaces_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .mount(&server)
        .await;

    let result = test_client(&server).search("Restaurant", &area()).await;
    match result {
        Err(ProviderError::RateLimited {
            retry_after_secs, ..
        }) => assert_eq!(retry_after_secs, 30),
        other => panic!("expected RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn retries_after_429_and_succeeds() {
    let server = MockServer::start().await;

    // First request returns 429 (served once).
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([curry_36()])))
        .mount(&server)
        .await;

    // 1 retry, 0 ms backoff so the test does not sleep.
    let client = NominatimClient::new(&server.uri(), 5, "tastetrail-test/0.1", 1, 0).unwrap();
    let result = client.search("Restaurant", &area()).await;
    assert!(result.is_ok(), "expected Ok after retry, got: {result:?}");
    assert_eq!(result.unwrap().len(), 1);
}

#[tokio::test]
async fn server_errors_are_retried_until_exhausted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3) // 1 initial + 2 retries
        .mount(&server)
        .await;

    let client = NominatimClient::new(&server.uri(), 5, "tastetrail-test/0.1", 2, 0).unwrap();
    let result = client.search("Restaurant", &area()).await;
    assert!(
        matches!(result, Err(ProviderError::UnexpectedStatus { status: 503, .. })),
        "expected UnexpectedStatus 503, got: {result:?}"
    );
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let client = NominatimClient::new(&server.uri(), 5, "tastetrail-test/0.1", 2, 0).unwrap();
    let result = client.search("Restaurant", &area()).await;
    assert!(matches!(
        result,
        Err(ProviderError::UnexpectedStatus { status: 403, .. })
    ));
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = test_client(&server).search("Restaurant", &area()).await;
    assert!(
        matches!(result, Err(ProviderError::Deserialize { .. })),
        "expected Deserialize error, got: {result:?}"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = NominatimClient::new("::not a url::", 5, "tastetrail-test/0.1", 0, 0);
    assert!(matches!(result, Err(ProviderError::InvalidBaseUrl { .. })));
}
