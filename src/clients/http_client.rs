//! Authenticated HTTP client for one shop's Admin API.
//!
//! A [`HttpClient`] is built per catalog request from the caller's
//! [`ShopCredentials`]. It shares the process-wide [`reqwest::Client`]
//! (connection pool) and sends every request exactly once.

use std::collections::HashMap;

use crate::auth::ShopCredentials;
use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::BridgeConfig;

/// Crate version from Cargo.toml.
pub const BRIDGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Builds the pooled [`reqwest::Client`] shared by every upstream call.
///
/// # Errors
///
/// Returns the [`reqwest::Error`] if the TLS backend cannot be initialised.
pub fn build_reqwest_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .use_rustls_tls()
        .user_agent(user_agent())
        .build()
}

fn user_agent() -> String {
    let rust_version = env!("CARGO_PKG_RUST_VERSION");
    format!("Catalog Bridge v{BRIDGE_VERSION} | Rust {rust_version}")
}

/// HTTP client bound to one shop and access token.
///
/// # Example
///
/// ```rust
/// use catalog_bridge::{ApiKey, ApiSecretKey, BridgeConfig, ShopCredentials, ShopDomain};
/// use catalog_bridge::clients::HttpClient;
///
/// let config = BridgeConfig::builder()
///     .api_key(ApiKey::new("key").unwrap())
///     .api_secret_key(ApiSecretKey::new("secret").unwrap())
///     .build()
///     .unwrap();
/// let credentials = ShopCredentials::new(ShopDomain::new("demo").unwrap(), "shpat_1");
///
/// let client = HttpClient::new(reqwest::Client::new(), "/admin/api/2025-10", &credentials, &config);
/// assert_eq!(client.base_uri(), "https://demo.myshopify.com");
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    /// Origin, e.g. `https://my-store.myshopify.com`.
    base_uri: String,
    /// e.g. `/admin/api/2025-10`.
    base_path: String,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a client for `credentials.shop`.
    ///
    /// The origin is the shop's own domain unless an upstream override is
    /// configured.
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        base_path: impl Into<String>,
        credentials: &ShopCredentials,
        config: &BridgeConfig,
    ) -> Self {
        let base_uri = config.shop_origin(&credentials.shop);

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent());
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        if !credentials.access_token.is_empty() {
            default_headers.insert(
                "X-Shopify-Access-Token".to_string(),
                credentials.access_token.clone(),
            );
        }

        Self {
            client,
            base_uri,
            base_path: base_path.into(),
            default_headers,
        }
    }

    /// Origin requests are sent to.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Path prefix of every request.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Headers added to every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends `request` once.
    ///
    /// # Errors
    ///
    /// - [`HttpError::InvalidRequest`] if the request fails validation
    /// - [`HttpError::Network`] if the platform cannot be reached
    /// - [`HttpError::Response`] for any non-2xx status, carrying the raw body
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!("{}{}/{}", self.base_uri, self.base_path, request.path);

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(body_type) = &request.body_type {
            req_builder = req_builder.header("Content-Type", body_type.as_content_type());
        }
        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }
        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!(method = %request.http_method, path = %request.path, "upstream request");

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        let response = HttpResponse::new(code, res_headers, body);

        if let Some(reason) = response.deprecation_reason() {
            tracing::warn!(
                "Deprecated request to Shopify API at {}, received reason: {}",
                request.path,
                reason
            );
        }
        if let Some(limit) = response.api_call_limit {
            tracing::debug!(
                used = limit.request_count,
                bucket = limit.bucket_size,
                "api call limit"
            );
        }

        if response.is_ok() {
            return Ok(response);
        }

        tracing::warn!(
            path = %request.path,
            status = code,
            request_id = response.request_id().unwrap_or("-"),
            "upstream request failed"
        );

        Err(HttpError::Response(HttpResponseError {
            code,
            error_reference: response.request_id().map(String::from),
            body: response.body,
        }))
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, ApiSecretKey, HostUrl, ShopDomain};

    fn create_test_config() -> BridgeConfig {
        BridgeConfig::builder()
            .api_key(ApiKey::new("test-key").unwrap())
            .api_secret_key(ApiSecretKey::new("test-secret").unwrap())
            .build()
            .unwrap()
    }

    fn create_test_credentials() -> ShopCredentials {
        ShopCredentials::new(ShopDomain::new("test-shop").unwrap(), "test-access-token")
    }

    fn create_client(config: &BridgeConfig, credentials: &ShopCredentials) -> HttpClient {
        HttpClient::new(reqwest::Client::new(), "/admin/api/2025-10", credentials, config)
    }

    #[test]
    fn test_client_construction_with_credentials() {
        let client = create_client(&create_test_config(), &create_test_credentials());

        assert_eq!(client.base_uri(), "https://test-shop.myshopify.com");
        assert_eq!(client.base_path(), "/admin/api/2025-10");
    }

    #[test]
    fn test_base_uri_uses_upstream_override() {
        let config = BridgeConfig::builder()
            .api_key(ApiKey::new("test-key").unwrap())
            .api_secret_key(ApiSecretKey::new("test-secret").unwrap())
            .upstream_url(HostUrl::new("http://127.0.0.1:9999").unwrap())
            .build()
            .unwrap();
        let client = create_client(&config, &create_test_credentials());

        assert_eq!(client.base_uri(), "http://127.0.0.1:9999");
    }

    #[test]
    fn test_access_token_header_injection() {
        let client = create_client(&create_test_config(), &create_test_credentials());

        assert_eq!(
            client.default_headers().get("X-Shopify-Access-Token"),
            Some(&"test-access-token".to_string())
        );
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_no_access_token_header_when_empty() {
        let credentials = ShopCredentials::new(ShopDomain::new("test-shop").unwrap(), "");
        let client = create_client(&create_test_config(), &credentials);

        assert!(client
            .default_headers()
            .get("X-Shopify-Access-Token")
            .is_none());
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = create_client(&create_test_config(), &create_test_credentials());

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("Catalog Bridge v"));
        assert!(user_agent.contains("Rust"));
    }
}
