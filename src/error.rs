//! Configuration error types.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that a
//! misconfigured bridge fails at start-up rather than on the first request.
//!
//! # Example
//!
//! ```rust
//! use catalog_bridge::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while building or loading the bridge configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Shopify API key.")]
    EmptyApiKey,

    /// API secret key cannot be empty.
    #[error("API secret key cannot be empty. Please provide a valid Shopify API secret key.")]
    EmptyApiSecretKey,

    /// Shop domain is invalid.
    #[error("Invalid shop domain '{domain}'. Expected format: 'shop-name' or 'shop-name.myshopify.com'.")]
    InvalidShopDomain {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM' (e.g., '2025-01') or 'unstable'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// Scopes are invalid.
    #[error("Invalid scopes: {reason}")]
    InvalidScopes {
        /// The reason the scopes are invalid.
        reason: String,
    },

    /// A required builder field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://myapp.example.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required environment variable is not set.
    #[error("Missing environment variable: {name}")]
    MissingEnvVar {
        /// Name of the variable.
        name: &'static str,
    },

    /// An environment variable is set but cannot be parsed.
    #[error("Invalid environment variable {name}: {reason}")]
    InvalidEnvVar {
        /// Name of the variable.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
