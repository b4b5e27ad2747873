//! REST client for the Admin API.

use std::collections::HashMap;

use crate::auth::ShopCredentials;
use crate::clients::rest::RestError;
use crate::clients::{DataType, HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::{ApiVersion, BridgeConfig};

/// Admin REST API client for one shop.
///
/// Built per request from the caller's credentials; holds no state beyond
/// the [`HttpClient`] and the API version.
#[derive(Debug)]
pub struct RestClient {
    http_client: HttpClient,
    api_version: ApiVersion,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a client using the configured API version.
    #[must_use]
    pub fn new(http: reqwest::Client, credentials: &ShopCredentials, config: &BridgeConfig) -> Self {
        let api_version = config.api_version().clone();

        if api_version.is_deprecated() {
            tracing::warn!(
                "API version {} is below the minimum supported version {}",
                api_version,
                ApiVersion::minimum_supported()
            );
        }

        let base_path = format!("/admin/api/{api_version}");
        let http_client = HttpClient::new(http, base_path, credentials, config);

        Self {
            http_client,
            api_version,
        }
    }

    /// The API version in the base path.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// [`RestError::InvalidPath`] for an empty path, [`RestError::Http`] for
    /// transport failures and non-2xx responses.
    pub async fn get(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Get, path, None, query).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`RestClient::get`].
    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Post, path, Some(body), query)
            .await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`RestClient::get`].
    pub async fn put(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Put, path, Some(body), query)
            .await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`RestClient::get`].
    pub async fn delete(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Delete, path, None, query)
            .await
    }

    async fn make_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        let normalized_path = normalize_path(path)?;

        let mut builder = HttpRequest::builder(method, &normalized_path);

        if let Some(body_value) = body {
            builder = builder.body(body_value).body_type(DataType::Json);
        }

        if let Some(query_params) = query {
            builder = builder.query(query_params);
        }

        let request = builder.build().map_err(|e| RestError::Http(e.into()))?;

        self.http_client.request(request).await.map_err(Into::into)
    }
}

fn normalize_path(path: &str) -> Result<String, RestError> {
    let path = path.trim_start_matches('/');
    let path = path.strip_suffix(".json").unwrap_or(path);

    if path.is_empty() {
        return Err(RestError::InvalidPath {
            path: String::new(),
        });
    }

    Ok(format!("{path}.json"))
}
