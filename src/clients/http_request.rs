//! Upstream request description.
//!
//! [`HttpRequest`] is built through [`HttpRequestBuilder`] and validated
//! before it is handed to [`HttpClient`](crate::clients::HttpClient).

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used against the Admin REST API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Content type of a request body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    /// `application/json`
    Json,
}

impl DataType {
    /// Value for the `Content-Type` header.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
        }
    }
}

/// A single upstream call. Sent exactly once, never retried.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// Method.
    pub http_method: HttpMethod,
    /// Path relative to the client's base path, e.g. `products.json`.
    pub path: String,
    /// JSON body.
    pub body: Option<serde_json::Value>,
    /// Content type of `body`.
    pub body_type: Option<DataType>,
    /// Query parameters.
    pub query: Option<HashMap<String, String>>,
}

impl HttpRequest {
    /// Starts building a request.
    ///
    /// # Example
    ///
    /// ```rust
    /// use catalog_bridge::clients::{HttpMethod, HttpRequest};
    ///
    /// let request = HttpRequest::builder(HttpMethod::Get, "products.json")
    ///     .query_param("fields", "id,tags")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(request.path, "products.json");
    /// ```
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Checks that a body has a content type and that POST/PUT carry a body.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] describing the first problem found.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.body.is_some() && self.body_type.is_none() {
            return Err(InvalidHttpRequestError::MissingBodyType);
        }

        if matches!(self.http_method, HttpMethod::Post | HttpMethod::Put) && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for [`HttpRequest`].
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<serde_json::Value>,
    body_type: Option<DataType>,
    query: Option<HashMap<String, String>>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            body_type: None,
            query: None,
        }
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the body's content type.
    #[must_use]
    pub const fn body_type(mut self, body_type: DataType) -> Self {
        self.body_type = Some(body_type);
        self
    }

    /// Replaces all query parameters.
    #[must_use]
    pub fn query(mut self, query: HashMap<String, String>) -> Self {
        self.query = Some(query);
        self
    }

    /// Adds one query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Builds and validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if [`HttpRequest::verify`] fails.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            body_type: self.body_type,
            query: self.query,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
    }

    #[test]
    fn test_builder_creates_valid_post_request() {
        let request = HttpRequest::builder(HttpMethod::Post, "products.json")
            .body(json!({"product": {"title": "Test"}}))
            .body_type(DataType::Json)
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Post);
        assert_eq!(request.body_type, Some(DataType::Json));
    }

    #[test]
    fn test_verify_requires_body_for_put() {
        let result = HttpRequest::builder(HttpMethod::Put, "products/123.json").build();

        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "put"
        ));
    }

    #[test]
    fn test_verify_requires_body_type_when_body_present() {
        let result = HttpRequest::builder(HttpMethod::Delete, "products/1.json")
            .body(json!({}))
            .build();

        assert!(matches!(result, Err(InvalidHttpRequestError::MissingBodyType)));
    }

    #[test]
    fn test_builder_with_query_params() {
        let request = HttpRequest::builder(HttpMethod::Get, "products.json")
            .query_param("limit", "250")
            .query_param("since_id", "42")
            .build()
            .unwrap();

        let query = request.query.unwrap();
        assert_eq!(query.get("limit"), Some(&"250".to_string()));
        assert_eq!(query.get("since_id"), Some(&"42".to_string()));
    }
}
