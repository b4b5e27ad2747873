//! Upstream response wrapper.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

/// Parsed `X-Shopify-Shop-Api-Call-Limit` header (`used/bucket`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApiCallLimit {
    /// Requests currently in the leaky bucket.
    pub request_count: u32,
    /// Bucket capacity.
    pub bucket_size: u32,
}

impl ApiCallLimit {
    /// Parses `"32/40"` style values.
    #[must_use]
    pub fn parse(header_value: &str) -> Option<Self> {
        let (count, size) = header_value.split_once('/')?;
        Some(Self {
            request_count: count.trim().parse().ok()?,
            bucket_size: size.trim().parse().ok()?,
        })
    }
}

/// Response from the platform.
///
/// The body is kept as raw text: successful list calls and every error are
/// relayed to the bridge's caller byte for byte, and only the pieces the
/// bridge inspects are deserialized through [`HttpResponse::json`].
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub code: u16,
    /// Lower-cased header names to their values.
    pub headers: HashMap<String, Vec<String>>,
    /// Body as received.
    pub body: String,
    /// Rate limit bucket state, when reported.
    pub api_call_limit: Option<ApiCallLimit>,
}

impl HttpResponse {
    /// Wraps a status, headers and body.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: String) -> Self {
        let api_call_limit = headers
            .get("x-shopify-shop-api-call-limit")
            .and_then(|values| values.first())
            .and_then(|value| ApiCallLimit::parse(value));

        Self {
            code,
            headers,
            body,
            api_call_limit,
        }
    }

    /// `true` for 2xx.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Deserializes the body.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// `X-Request-Id` header.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// `X-Shopify-API-Deprecated-Reason` header.
    #[must_use]
    pub fn deprecation_reason(&self) -> Option<&str> {
        self.header("x-shopify-api-deprecated-reason")
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}
