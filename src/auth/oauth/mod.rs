//! OAuth 2.0 authorization-code flow.
//!
//! The bridge only implements the classic redirect flow:
//!
//! 1. **Authorization** ([`begin_auth`]): mint a [`StateParam`] and build the
//!    consent URL. The HTTP layer stores the state in a cookie and redirects.
//!
//! 2. **Callback** ([`validate_auth_callback`]): compare the callback's state
//!    with the cookie, check the required parameters and the HMAC, then
//!    exchange the code for an access token.
//!
//! The token response is handed back to the caller verbatim. Nothing is
//! persisted.
//!
//! # Security
//!
//! - State and HMAC comparisons are constant time
//! - A previous API secret can be configured so callbacks signed before a
//!   key rotation still verify
//!
//! # Example
//!
//! ```rust
//! use catalog_bridge::{ApiKey, ApiSecretKey, BridgeConfig, HostUrl, ShopDomain};
//! use catalog_bridge::auth::oauth::{begin_auth, compute_signature, verify_callback, CallbackQuery};
//!
//! let config = BridgeConfig::builder()
//!     .api_key(ApiKey::new("client-id").unwrap())
//!     .api_secret_key(ApiSecretKey::new("secret").unwrap())
//!     .host(HostUrl::new("https://bridge.example.com").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let started = begin_auth(&config, &ShopDomain::new("demo").unwrap()).unwrap();
//!
//! let mut query = CallbackQuery::from_pairs([
//!     ("code", "abc"),
//!     ("shop", "demo.myshopify.com"),
//!     ("state", started.state.as_ref()),
//! ]);
//! let hmac = compute_signature(&query.to_signable_string(), "secret");
//! query.set("hmac", hmac);
//!
//! let verified = verify_callback(&config, &query, Some(started.state.as_ref())).unwrap();
//! assert_eq!(verified.code, "abc");
//! ```

mod begin_auth;
mod callback_query;
mod error;
pub mod hmac;
mod state;
mod validate_callback;

pub use begin_auth::{begin_auth, BeginAuthResult};
pub use callback_query::CallbackQuery;
pub use error::OAuthError;
pub use hmac::{compute_signature, constant_time_compare, validate_hmac};
pub use state::StateParam;
pub use validate_callback::{exchange_code, validate_auth_callback, verify_callback, VerifiedCallback};
