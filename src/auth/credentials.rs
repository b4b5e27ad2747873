//! Per-request shop credentials.

use crate::config::ShopDomain;
use std::fmt;

/// The shop and access token a caller supplies with each catalog request.
///
/// Credentials are never stored by the bridge; they live for the duration of
/// one request. `Debug` output masks the token.
///
/// # Example
///
/// ```rust
/// use catalog_bridge::{ShopCredentials, ShopDomain};
///
/// let credentials = ShopCredentials::new(ShopDomain::new("demo").unwrap(), "shpat_123");
/// assert!(!format!("{credentials:?}").contains("shpat_123"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ShopCredentials {
    /// Shop the token was issued for.
    pub shop: ShopDomain,
    /// Admin API access token.
    pub access_token: String,
}

impl ShopCredentials {
    /// Pairs a shop with its access token.
    #[must_use]
    pub fn new(shop: ShopDomain, access_token: impl Into<String>) -> Self {
        Self {
            shop,
            access_token: access_token.into(),
        }
    }
}

impl fmt::Debug for ShopCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShopCredentials")
            .field("shop", &self.shop)
            .field("access_token", &"*****")
            .finish()
    }
}

// Verify ShopCredentials is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopCredentials>();
};
