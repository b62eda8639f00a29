//! Integration tests for `HvcClient` using wiremock HTTP mocks.

use kliko_core::model::Credentials;
use kliko_core::ports::{FetchError, ScheduleSource};
use kliko_provider_hvc::HvcClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> HvcClient {
    HvcClient::with_base_url(base_url).expect("client construction should not fail")
}

fn credentials() -> Credentials {
    Credentials::new("2381 xd", "10").expect("valid credentials")
}

#[tokio::test]
async fn resolve_returns_the_first_bag_id() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "bagId": "0553200000000001",
            "postcode": "2381XD",
            "huisnummer": 10
        },
        {
            "bagId": "0553200000000002"
        }
    ]);

    // Credentials normalization feeds the URL: uppercased, no whitespace.
    Mock::given(method("GET"))
        .and(path("/rest/adressen/2381XD-10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let bag_id = client
        .resolve(&credentials())
        .await
        .expect("should resolve bag id");

    assert_eq!(bag_id.0, "0553200000000001");
}

#[tokio::test]
async fn resolve_fails_on_an_empty_address_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/adressen/2381XD-10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .resolve(&credentials())
        .await
        .expect_err("empty response must not resolve");

    assert!(matches!(err, FetchError::AddressNotFound { .. }));
}

#[tokio::test]
async fn resolve_fails_when_the_bag_id_field_is_missing() {
    let server = MockServer::start().await;

    let body = serde_json::json!([{ "postcode": "2381XD", "huisnummer": 10 }]);

    Mock::given(method("GET"))
        .and(path("/rest/adressen/2381XD-10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .resolve(&credentials())
        .await
        .expect_err("missing bagId must not resolve");

    assert!(matches!(err, FetchError::MissingBagId));
}

#[tokio::test]
async fn resolve_fails_on_a_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/adressen/2381XD-10"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .resolve(&credentials())
        .await
        .expect_err("server error must not resolve");

    assert!(matches!(err, FetchError::Network(_)));
}

#[tokio::test]
async fn resolve_fails_on_a_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/adressen/2381XD-10"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .resolve(&credentials())
        .await
        .expect_err("malformed body must not resolve");

    assert!(matches!(err, FetchError::Network(_)));
}

#[tokio::test]
async fn waste_streams_map_api_entries_including_null_dates() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        { "id": 5, "title": "GFT", "ophaaldatum": "2024-03-01" },
        { "id": 6, "title": "Plastic", "ophaaldatum": null },
        { "id": 99, "title": "Mystery", "ophaaldatum": "2024-03-02" }
    ]);

    Mock::given(method("GET"))
        .and(path("/rest/adressen/0553200000000001/afvalstromen"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let streams = client
        .waste_streams(&kliko_core::model::BagId(String::from("0553200000000001")))
        .await
        .expect("should fetch streams");

    // Everything comes back raw; filtering by catalog happens downstream.
    assert_eq!(streams.len(), 3);
    assert_eq!(streams[0].id, 5);
    assert_eq!(streams[0].title, "GFT");
    assert_eq!(streams[0].pickup_date.as_deref(), Some("2024-03-01"));
    assert_eq!(streams[1].pickup_date, None);
    assert_eq!(streams[2].id, 99);
}

#[tokio::test]
async fn check_connection_collapses_the_outcome_to_a_bool() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/adressen/2381XD-10"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{ "bagId": "0553200000000001" }])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/adressen/9999ZZ-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.check_connection(&credentials()).await);

    let unknown = Credentials::new("9999ZZ", "1").expect("valid credentials");
    assert!(!client.check_connection(&unknown).await);
}
