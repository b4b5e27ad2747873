//! Authentication types.
//!
//! - [`AuthScopes`]: scopes requested on the consent screen
//! - [`ShopCredentials`]: shop + access token supplied with every catalog call
//! - [`oauth`]: the authorization-code handshake (consent redirect, callback
//!   verification, code exchange)

mod credentials;
pub mod oauth;
mod scopes;

pub use credentials::ShopCredentials;
pub use scopes::AuthScopes;
