//! Tests de middleware.

mod helpers;

use helpers::client;
use uuid::Uuid;

// === Request ID ===

#[tokio::test]
async fn response_includes_request_id() {
    let response = client().get("/health").await;

    response.assert_header_exists("x-request-id");
}

#[tokio::test]
async fn request_id_is_uuid_v4() {
    let response = client().get("/health").await;

    let id = response.header("x-request-id").unwrap();
    let parsed = Uuid::parse_str(id).unwrap();

    assert_eq!(parsed.get_version_num(), 4);
}

#[tokio::test]
async fn propagates_incoming_request_id() {
    let custom_id = "my-custom-request-id-12345";

    let response = client()
        .get_with_headers("/health", vec![("x-request-id", custom_id)])
        .await;

    response.assert_header("x-request-id", custom_id);
}

#[tokio::test]
async fn replaces_oversized_request_id() {
    let oversized = "a".repeat(300);

    let response = client()
        .get_with_headers("/health", vec![("x-request-id", oversized.as_str())])
        .await;

    let id = response.header("x-request-id").unwrap();
    assert!(Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn generates_different_ids_for_each_request() {
    let response1 = client().get("/health").await;
    let response2 = client().get("/health").await;

    let id1 = response1.header("x-request-id").unwrap();
    let id2 = response2.header("x-request-id").unwrap();

    assert_ne!(id1, id2);
}

#[tokio::test]
async fn request_id_present_on_errors() {
    let response = client().post_raw("/", "not json").await;

    response.assert_header_exists("x-request-id");
}

// === CORS ===

#[tokio::test]
async fn cors_allows_any_origin() {
    let response = client()
        .get_with_headers("/health", vec![("origin", "https://somewhere.test")])
        .await;

    response.assert_header("access-control-allow-origin", "*");
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let response = client()
        .options(
            "/",
            vec![
                ("origin", "https://somewhere.test"),
                ("access-control-request-method", "POST"),
                ("access-control-request-headers", "content-type"),
            ],
        )
        .await;

    response
        .assert_status(axum::http::StatusCode::OK)
        .assert_header("access-control-allow-origin", "*")
        .assert_header_exists("access-control-allow-methods")
        .assert_header_exists("access-control-allow-headers");
}

#[tokio::test]
async fn bare_options_returns_200() {
    let response = client().options("/", Vec::new()).await;

    response.assert_status(axum::http::StatusCode::OK);
}
