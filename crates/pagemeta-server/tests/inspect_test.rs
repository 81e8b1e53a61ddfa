//! Tests de `POST /`.

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use helpers::{StubSource, assert_batch_keys, client, client_with, source::full_page};
use serde_json::{Value, json};

const A: &str = "https://a.test/";
const B: &str = "https://b.test/";
const DOWN: &str = "https://down.test/";

fn source() -> Arc<StubSource> {
    Arc::new(
        StubSource::new()
            .page(A, &full_page("a"))
            .page(B, &full_page("b"))
            .page_with_status("https://gone.test/", 404, "<title>Not Found</title>"),
    )
}

#[tokio::test]
async fn returns_metadata_for_each_url() {
    let (client, _) = client_with(source());

    let response = client.inspect(&[A, B]).await;
    response
        .assert_status(StatusCode::OK)
        .assert_content_type_contains("application/json");

    let body: Value = response.json();
    assert_batch_keys(&body, &[A, B]);
    assert_eq!(body[A]["title"], "a");
    assert_eq!(body[A]["description"], "About a");
    assert_eq!(body[A]["og"]["title"], "OG a");
    assert_eq!(body[A]["og"]["type"], "website");
    assert_eq!(body[A]["og"]["image"], "https://img.test/a.png");
    assert_eq!(body[A]["og"]["url"], "https://a.test/");
    assert_eq!(body[B]["title"], "b");
}

#[tokio::test]
async fn failed_url_is_null_and_others_succeed() {
    let (client, state) = client_with(source());

    let body: Value = client.inspect(&[DOWN, B]).await.json();

    assert_batch_keys(&body, &[DOWN, B]);
    assert!(body[DOWN].is_null());
    assert_eq!(body[B]["title"], "b");

    assert!(state.cache().get(DOWN).is_none());
    assert!(state.cache().get(B).is_some());
}

#[tokio::test]
async fn all_urls_failing_is_still_200() {
    let (client, _) = client_with(source());

    let response = client.inspect(&[DOWN, "not a url"]).await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert!(body[DOWN].is_null());
    assert!(body["not a url"].is_null());
}

#[tokio::test]
async fn non_success_status_is_still_extracted() {
    let (client, _) = client_with(source());

    let body: Value = client.inspect(&["https://gone.test/"]).await.json();

    assert_eq!(body["https://gone.test/"]["title"], "Not Found");
}

#[tokio::test]
async fn missing_fields_are_empty_strings() {
    let source = Arc::new(StubSource::new().page(A, "<p>nothing here</p>"));
    let (client, _) = client_with(source);

    let body: Value = client.inspect(&[A]).await.json();

    assert_eq!(
        body[A],
        json!({
            "title": "",
            "description": "",
            "og": { "title": "", "type": "", "image": "", "url": "" }
        })
    );
}

#[tokio::test]
async fn second_request_is_served_from_cache() {
    let source = source();
    let (client, _) = client_with(Arc::clone(&source));

    client.inspect(&[A]).await;
    let body: Value = client.inspect(&[A]).await.json();

    assert_eq!(body[A]["title"], "a");
    assert_eq!(source.calls(A), 1);
}

#[tokio::test]
async fn duplicate_urls_yield_one_key() {
    let (client, _) = client_with(source());

    let response = client.inspect(&[A, B, A]).await;
    let body: Value = response.json();
    assert_batch_keys(&body, &[A, B]);

    // Orden de primera aparicion
    let text = response.text();
    assert!(text.find(A).unwrap() < text.find(B).unwrap());
}

#[tokio::test]
async fn text_plain_body_is_decoded() {
    let (client, _) = client_with(source());

    let response = client
        .post_with_headers(
            "/",
            vec![("content-type", "text/plain;charset=UTF-8")],
            &json!({ "urls": [A] }).to_string(),
        )
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body[A]["title"], "a");
}

#[tokio::test]
async fn body_without_content_type_is_decoded() {
    let (client, _) = client_with(source());

    let response = client
        .post_with_headers("/", Vec::new(), &json!({ "urls": [A, DOWN] }).to_string())
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_batch_keys(&body, &[A, DOWN]);
    assert!(body[DOWN].is_null());
}

#[tokio::test]
async fn undecodable_text_plain_body_is_bad_request() {
    let response = client()
        .post_with_headers("/", vec![("content-type", "text/plain")], "urls=a")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_urls_is_bad_request() {
    let response = client().post_json("/", &json!({ "urls": [] })).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "at least one urls should be specified");
}

#[tokio::test]
async fn missing_urls_is_bad_request() {
    let response = client().post_json("/", &json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "at least one urls should be specified");
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let response = client().post_raw("/", "{\"urls\": [").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn wrong_url_type_is_bad_request() {
    let response = client().post_json("/", &json!({ "urls": [1, 2] })).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn max_urls_is_enforced() {
    let cache = pagemeta_server::MetadataCache::new(Default::default());
    let state = pagemeta_server::AppState::from_source(cache, source()).with_max_urls(Some(1));
    let client = helpers::TestClient::new(pagemeta_server::create_router(state));

    client
        .inspect(&[A])
        .await
        .assert_status(StatusCode::OK);
    client
        .inspect(&[A, B])
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_on_root_is_not_allowed() {
    client()
        .get("/")
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
