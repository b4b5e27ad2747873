//! HTTP error responses.
//!
//! Every handler error funnels into [`ApiError`], which decides the status
//! code and body. Upstream failures keep the platform's status and body.

use axum::extract::rejection::JsonRejection;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;

use crate::auth::oauth::OAuthError;
use crate::catalog::CatalogError;
use crate::clients::{HttpError, RestError};

/// Error returned by the bridge's HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 400 with a plain-text reason.
    #[error("{0}")]
    BadRequest(String),

    /// 403 with a plain-text reason.
    #[error("{0}")]
    Forbidden(String),

    /// 404 with a plain-text reason.
    #[error("{0}")]
    NotFound(String),

    /// The platform's own error response, relayed as-is.
    #[error("upstream responded {status}")]
    Upstream {
        /// Upstream status code.
        status: u16,
        /// Upstream body.
        body: String,
    },

    /// The platform could not be reached or answered nonsense.
    #[error("{0}")]
    BadGateway(String),

    /// A failure on the bridge's side.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Status code the error is reported with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The error as a JSON value: the upstream body when it parses, the
    /// message otherwise.
    #[must_use]
    pub fn detail(&self) -> Value {
        match self {
            Self::Upstream { body, .. } => {
                serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.clone()))
            }
            Self::Internal(_) => Value::String("Internal Server Error".to_string()),
            other => Value::String(other.to_string()),
        }
    }

    /// Response shape of the sentinel check: `{"error": ..., "check": false}`.
    #[must_use]
    pub fn into_sentinel_response(self) -> Response {
        self.log();
        let status = self.status();
        (status, Json(json!({ "error": self.detail(), "check": false }))).into_response()
    }

    fn log(&self) {
        match self {
            Self::Internal(message) => tracing::error!("Internal error: {message}"),
            Self::BadGateway(message) => tracing::error!("Upstream unreachable: {message}"),
            Self::Upstream { status, .. } => tracing::warn!(status, "relaying upstream error"),
            _ => tracing::debug!(error = %self, "request rejected"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();

        match self {
            Self::Upstream { body, .. } => {
                let content_type = if serde_json::from_str::<Value>(&body).is_ok() {
                    "application/json"
                } else {
                    "text/plain; charset=utf-8"
                };
                (status, [(header::CONTENT_TYPE, content_type)], body).into_response()
            }
            Self::Internal(_) => (status, "Internal Server Error").into_response(),
            other => (status, other.to_string()).into_response(),
        }
    }
}

impl From<OAuthError> for ApiError {
    fn from(error: OAuthError) -> Self {
        match error {
            OAuthError::StateMismatch => Self::Forbidden(error.to_string()),
            OAuthError::InvalidHmac | OAuthError::InvalidCallback { .. } => {
                Self::BadRequest(error.to_string())
            }
            OAuthError::MissingHostConfig => Self::Internal(error.to_string()),
            OAuthError::TokenExchangeFailed { status, message } => Self::Upstream {
                status,
                body: message,
            },
            OAuthError::Network(e) => Self::BadGateway(format!("Network error: {e}")),
        }
    }
}

impl From<RestError> for ApiError {
    fn from(error: RestError) -> Self {
        match error {
            RestError::Http(HttpError::Response(response)) => Self::Upstream {
                status: response.code,
                body: response.body,
            },
            RestError::Http(HttpError::Network(e)) => Self::BadGateway(format!("Network error: {e}")),
            RestError::Decode(e) => Self::BadGateway(format!("Unexpected upstream body: {e}")),
            RestError::Http(HttpError::InvalidRequest(e)) => Self::Internal(e.to_string()),
            RestError::InvalidPath { .. } => Self::Internal(error.to_string()),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::ProductNotFound => Self::NotFound(error.to_string()),
            CatalogError::InvalidPayload(reason) => Self::BadRequest(reason),
            CatalogError::Rest(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
