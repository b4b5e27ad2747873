//! REST client errors.

use crate::clients::HttpError;
use thiserror::Error;

/// Errors returned by [`RestClient`](crate::clients::RestClient).
#[derive(Debug, Error)]
pub enum RestError {
    /// The path is empty after normalization.
    #[error("Invalid REST API path: {path}")]
    InvalidPath {
        /// The rejected path.
        path: String,
    },

    /// The upstream call failed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A successful response did not have the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;

    #[test]
    fn test_invalid_path_error_includes_path_in_message() {
        let error = RestError::InvalidPath {
            path: "/invalid/path".to_string(),
        };
        let message = error.to_string();

        assert!(message.contains("Invalid REST API path"));
        assert!(message.contains("/invalid/path"));
    }

    #[test]
    fn test_http_error_is_transparent() {
        let error = RestError::Http(HttpError::Response(HttpResponseError {
            code: 401,
            body: r#"{"errors":"Invalid API key or access token"}"#.to_string(),
            error_reference: None,
        }));
        assert!(error.to_string().contains("Invalid API key"));
    }

    #[test]
    fn test_decode_error_from_serde() {
        let serde_error = serde_json::from_str::<u64>("not a number").unwrap_err();
        let error: RestError = serde_error.into();
        assert!(error.to_string().starts_with("Unexpected response body"));
    }
}
