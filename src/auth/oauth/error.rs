//! OAuth handshake errors.
//!
//! # Example
//!
//! ```rust
//! use catalog_bridge::auth::oauth::OAuthError;
//!
//! let error = OAuthError::InvalidHmac;
//! assert_eq!(error.to_string(), "HMAC validation failed");
//! ```

use thiserror::Error;

/// Errors that can occur during the authorization-code flow.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// The callback's `state` does not match the value stored in the cookie.
    ///
    /// Either the cookie is missing or the callback was not initiated by this
    /// browser's `/authorize` request.
    #[error("Request origin cannot be verified")]
    StateMismatch,

    /// The callback's HMAC does not match the one computed with the app secret.
    #[error("HMAC validation failed")]
    InvalidHmac,

    /// Callback parameters are missing or malformed.
    #[error("{reason}")]
    InvalidCallback {
        /// What is wrong with the callback.
        reason: String,
    },

    /// No public host is configured, so no redirect URI can be built.
    #[error("Host URL must be configured for OAuth")]
    MissingHostConfig,

    /// The token endpoint answered with a non-success status.
    #[error("Token exchange failed with status {status}: {message}")]
    TokenExchangeFailed {
        /// HTTP status returned by the token endpoint.
        status: u16,
        /// Response body returned by the token endpoint.
        message: String,
    },

    /// The token endpoint could not be reached.
    #[error("Network error during token exchange: {0}")]
    Network(#[from] reqwest::Error),
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};
