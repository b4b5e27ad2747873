//! Upstream HTTP client layer.
//!
//! - [`HttpClient`]: authenticated client for one shop's Admin API
//! - [`HttpRequest`] / [`HttpResponse`]: request description and raw response
//! - [`rest::RestClient`]: versioned REST client with `.json` path handling
//!
//! Every request is sent exactly once. Non-2xx responses come back as
//! [`HttpError::Response`] with the upstream status and body intact.

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{build_reqwest_client, HttpClient, BRIDGE_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{ApiCallLimit, HttpResponse};

pub use rest::{RestClient, RestError};
