//! Consent URL generation.
//!
//! [`begin_auth`] is the first leg of the authorization-code flow: it mints a
//! fresh [`StateParam`] and builds the URL of the platform's consent screen.
//! The caller stores the state (the bridge uses a cookie) and redirects the
//! user to [`BeginAuthResult::auth_url`].

use crate::auth::oauth::error::OAuthError;
use crate::auth::oauth::state::StateParam;
use crate::config::{BridgeConfig, ShopDomain};

/// Consent URL plus the state token embedded in it.
#[derive(Clone, Debug)]
pub struct BeginAuthResult {
    /// Where to send the user.
    pub auth_url: String,
    /// Must be stored and compared with the callback's `state`.
    pub state: StateParam,
}

/// Builds the consent URL for `shop`.
///
/// The URL carries the client id, the configured scopes, the state token and
/// the fixed callback `{host}/callback`, all URL-encoded.
///
/// # Errors
///
/// Returns [`OAuthError::MissingHostConfig`] when no public host is
/// configured.
///
/// # Example
///
/// ```rust
/// use catalog_bridge::{ApiKey, ApiSecretKey, BridgeConfig, HostUrl, ShopDomain};
/// use catalog_bridge::auth::oauth::begin_auth;
///
/// let config = BridgeConfig::builder()
///     .api_key(ApiKey::new("client-id").unwrap())
///     .api_secret_key(ApiSecretKey::new("secret").unwrap())
///     .host(HostUrl::new("https://bridge.example.com").unwrap())
///     .build()
///     .unwrap();
///
/// let result = begin_auth(&config, &ShopDomain::new("demo").unwrap()).unwrap();
/// assert!(result.auth_url.starts_with("https://demo.myshopify.com/admin/oauth/authorize?"));
/// assert!(result.auth_url.contains(result.state.as_ref()));
/// ```
pub fn begin_auth(config: &BridgeConfig, shop: &ShopDomain) -> Result<BeginAuthResult, OAuthError> {
    let redirect_uri = config.callback_url().ok_or(OAuthError::MissingHostConfig)?;
    let state = StateParam::new();

    let params = [
        ("client_id", config.api_key().as_ref().to_string()),
        ("scope", config.scopes().to_string()),
        ("state", state.to_string()),
        ("redirect_uri", redirect_uri),
    ];

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let auth_url = format!("{}/admin/oauth/authorize?{query_string}", shop.origin());

    tracing::debug!(shop = %shop, "built consent URL");

    Ok(BeginAuthResult { auth_url, state })
}
