//! Errors raised by the upstream HTTP layer.
//!
//! - [`HttpResponseError`]: the platform answered with a non-2xx status
//! - [`InvalidHttpRequestError`]: a request failed validation before sending
//! - [`HttpError`]: union of the above plus transport failures
//!
//! Response errors keep the upstream status code and the raw body so the
//! HTTP boundary can relay both to the caller unchanged.

use thiserror::Error;

/// Non-2xx response from the platform.
#[derive(Debug, Error)]
#[error("upstream responded {code}: {body}")]
pub struct HttpResponseError {
    /// HTTP status code.
    pub code: u16,
    /// Response body exactly as received.
    pub body: String,
    /// `X-Request-Id` of the failed call, if the platform sent one.
    pub error_reference: Option<String>,
}

/// A request that cannot be sent as built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A body was set without a content type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// POST and PUT need a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The offending method.
        method: String,
    },
}

/// Every failure an upstream call can produce.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The platform answered with a non-2xx status.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// The request failed validation.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The platform could not be reached.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
