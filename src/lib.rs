//! # Shopify catalog bridge
//!
//! A small service that lets a third-party application install itself on a
//! Shopify store through the OAuth authorization-code flow, then create,
//! update, delete and inspect that store's products through a thin proxy.
//!
//! ## Overview
//!
//! - [`auth::oauth`]: consent redirect, callback verification (state cookie,
//!   HMAC-SHA256), code-for-token exchange
//! - [`catalog`]: product operations, the `ihubCheck` sentinel metafield and
//!   the paginated lookup of a product by external code
//! - [`clients`]: Admin REST API client, one request per call, no retries
//! - [`server`]: axum router, extractors and error responses
//! - [`config`]: validated configuration loaded once at start-up
//!
//! Nothing is persisted: the access token is returned to the caller, who
//! sends it back with every catalog request.
//!
//! ## Quick Start
//!
//! ```rust
//! use catalog_bridge::{ApiKey, ApiSecretKey, BridgeConfig, HostUrl};
//! use catalog_bridge::server::{create_app, AppState};
//!
//! let config = BridgeConfig::builder()
//!     .api_key(ApiKey::new("client-id").unwrap())
//!     .api_secret_key(ApiSecretKey::new("client-secret").unwrap())
//!     .host(HostUrl::new("https://bridge.example.com").unwrap())
//!     .scopes("write_products".parse().unwrap())
//!     .build()
//!     .unwrap();
//!
//! let app = create_app(AppState::new(config).unwrap());
//! # let _ = app;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is built once and shared read-only
//! - **Fail-fast validation**: newtypes validate on construction
//! - **Pass-through errors**: upstream status codes and bodies reach the
//!   caller unchanged

pub mod auth;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;

pub use auth::{AuthScopes, ShopCredentials};
pub use config::{
    ApiKey, ApiSecretKey, ApiVersion, BridgeConfig, BridgeConfigBuilder, HostUrl, LogFormat,
    ShopDomain,
};
pub use error::ConfigError;

pub use clients::{HttpClient, HttpError, HttpResponse, RestClient, RestError};
