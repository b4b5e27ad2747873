//! Shared helpers for the router integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use catalog_bridge::server::{create_app, AppState};
use catalog_bridge::{ApiKey, ApiSecretKey, ApiVersion, BridgeConfig, HostUrl};
use tower::ServiceExt;
use wiremock::{Match, MockServer};

pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-secret";
pub const ACCESS_TOKEN: &str = "shpat_test";
pub const SHOP: &str = "demo-shop.myshopify.com";

/// Config whose upstream calls all land on `upstream`.
pub fn test_config(upstream: &str) -> BridgeConfig {
    BridgeConfig::builder()
        .api_key(ApiKey::new(CLIENT_ID).unwrap())
        .api_secret_key(ApiSecretKey::new(CLIENT_SECRET).unwrap())
        .host(HostUrl::new("https://bridge.example.com").unwrap())
        .scopes("write_products".parse().unwrap())
        .upstream_url(HostUrl::new(upstream).unwrap())
        .build()
        .unwrap()
}

pub fn test_app(server: &MockServer) -> Router {
    create_app(AppState::new(test_config(&server.uri())).unwrap())
}

/// Admin API path for `resource`, e.g. `products.json`.
pub fn admin_path(resource: &str) -> String {
    format!("/admin/api/{}/{resource}", ApiVersion::latest())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

/// Catalog request carrying the `shop` and `authorization` headers.
pub fn catalog_request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("shop", SHOP)
        .header("authorization", format!("Bearer {ACCESS_TOKEN}"));

    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Matches on the `since_id` query parameter, `None` meaning absent.
pub struct SinceId(pub Option<String>);

impl Match for SinceId {
    fn matches(&self, request: &wiremock::Request) -> bool {
        let since_id = request
            .url
            .query_pairs()
            .find(|(key, _)| key == "since_id")
            .map(|(_, value)| value.into_owned());
        since_id == self.0
    }
}
