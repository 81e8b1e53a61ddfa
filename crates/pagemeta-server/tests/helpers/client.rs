//! Test client helpers.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use http_body_util::BodyExt;
use pagemeta_server::{AppState, CacheConfig, MetadataCache, create_router};
use tower::ServiceExt;

use super::source::StubSource;

/// Helper para tests de integracion HTTP.
pub struct TestClient {
    app: Router,
}

impl TestClient {
    /// Crea un nuevo test client con el router proporcionado.
    pub fn new(app: Router) -> Self {
        Self { app }
    }

    /// Hace un GET request.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send("GET", uri, Vec::new(), Body::empty()).await
    }

    /// Hace un GET request con headers personalizados.
    pub async fn get_with_headers(&self, uri: &str, headers: Vec<(&str, &str)>) -> TestResponse {
        self.send("GET", uri, headers, Body::empty()).await
    }

    /// Hace un DELETE request.
    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send("DELETE", uri, Vec::new(), Body::empty()).await
    }

    /// Hace un OPTIONS request con headers personalizados.
    pub async fn options(&self, uri: &str, headers: Vec<(&str, &str)>) -> TestResponse {
        self.send("OPTIONS", uri, headers, Body::empty()).await
    }

    /// POST con body JSON.
    pub async fn post_json(&self, uri: &str, body: &serde_json::Value) -> TestResponse {
        self.post_raw(uri, &body.to_string()).await
    }

    /// POST con un body arbitrario marcado como JSON.
    pub async fn post_raw(&self, uri: &str, body: &str) -> TestResponse {
        self.post_with_headers(
            uri,
            vec![(header::CONTENT_TYPE.as_str(), "application/json")],
            body,
        )
        .await
    }

    /// POST con headers personalizados; sin `Content-Type` si no se pasa uno.
    pub async fn post_with_headers(
        &self,
        uri: &str,
        headers: Vec<(&str, &str)>,
        body: &str,
    ) -> TestResponse {
        self.send("POST", uri, headers, Body::from(body.to_string()))
            .await
    }

    /// Pide la metadata de un batch de URLs.
    pub async fn inspect(&self, urls: &[&str]) -> TestResponse {
        self.post_json("/", &serde_json::json!({ "urls": urls })).await
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        headers: Vec<(&str, &str)>,
        body: Body,
    ) -> TestResponse {
        let mut builder = Request::builder().uri(uri).method(method);

        for (name, value) in headers {
            builder = builder.header(name, value);
        }

        self.request(builder.body(body).unwrap()).await
    }

    /// Ejecuta un request arbitrario.
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        TestResponse::from_response(response).await
    }
}

/// Wrapper sobre Response con helpers para assertions.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    async fn from_response(response: Response<Body>) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes()
            .to_vec();

        Self {
            status,
            headers,
            body,
        }
    }

    /// Retorna el body como string.
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Body is not valid UTF-8")
    }

    /// Parsea el body como JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON")
    }

    /// Retorna un header especifico.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Verifica que el status sea el esperado.
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {} but got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
        self
    }

    /// Verifica que el Content-Type contenga el valor esperado.
    pub fn assert_content_type_contains(&self, expected: &str) -> &Self {
        let content_type = self
            .header("content-type")
            .expect("Response missing Content-Type header");

        assert!(
            content_type.contains(expected),
            "Expected Content-Type to contain '{}' but got '{}'",
            expected,
            content_type
        );
        self
    }

    /// Verifica que un header exista.
    pub fn assert_header_exists(&self, name: &str) -> &Self {
        assert!(
            self.headers.contains_key(name),
            "Expected header '{}' to exist",
            name
        );
        self
    }

    /// Verifica que un header tenga un valor especifico.
    pub fn assert_header(&self, name: &str, expected: &str) -> &Self {
        let value = self
            .header(name)
            .unwrap_or_else(|| panic!("Header '{}' not found", name));

        assert_eq!(
            value, expected,
            "Expected header '{}' to be '{}' but got '{}'",
            name, expected, value
        );
        self
    }
}

/// Crea un TestClient con una fuente sin paginas y cache vacio.
pub fn client() -> TestClient {
    client_with(Arc::new(StubSource::new())).0
}

/// Crea un TestClient sobre la fuente dada; retorna tambien el estado para inspeccionar el cache.
pub fn client_with(source: Arc<StubSource>) -> (TestClient, AppState) {
    let cache = MetadataCache::new(CacheConfig::default());
    let state = AppState::from_source(cache, source);
    (TestClient::new(create_router(state.clone())), state)
}
