//! OAuth callback validation and token exchange.
//!
//! After the merchant approves the app, the platform redirects back to
//! `{host}/callback` with `shop`, `code`, `state`, `hmac` and a few more
//! parameters. [`verify_callback`] runs the checks in a fixed order:
//!
//! 1. `state` must equal the value stored in the `state` cookie
//! 2. `shop`, `hmac` and `code` must be present
//! 3. the HMAC must match (current secret, then the previous one)
//! 4. `shop` must be a valid shop domain
//!
//! [`validate_auth_callback`] then exchanges the code for an access token and
//! returns the token endpoint's body untouched. The bridge never parses or
//! stores the token.

use serde::Serialize;

use crate::auth::oauth::error::OAuthError;
use crate::auth::oauth::hmac::validate_hmac;
use crate::auth::oauth::state::StateParam;
use crate::auth::oauth::CallbackQuery;
use crate::config::{BridgeConfig, ShopDomain};

const MISSING_PARAMETERS: &str = "Required parameters missing";

/// A callback that passed every check and is ready for the code exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedCallback {
    /// Shop that issued the authorization code.
    pub shop: ShopDomain,
    /// Single-use authorization code.
    pub code: String,
}

#[derive(Serialize)]
struct AccessTokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
}

/// Checks state, required parameters, HMAC and shop domain, in that order.
///
/// `cookie_state` is the value of the `state` cookie sent with the callback,
/// if any. A missing cookie never matches.
///
/// # Errors
///
/// - [`OAuthError::StateMismatch`] when the state is missing or differs
/// - [`OAuthError::InvalidCallback`] when a required parameter is missing or
///   the shop domain is malformed
/// - [`OAuthError::InvalidHmac`] when the signature does not verify
pub fn verify_callback(
    config: &BridgeConfig,
    query: &CallbackQuery,
    cookie_state: Option<&str>,
) -> Result<VerifiedCallback, OAuthError> {
    let state_matches = match (cookie_state, query.state()) {
        (Some(stored), Some(received)) => StateParam::from_raw(stored).matches(received),
        _ => false,
    };
    if !state_matches {
        return Err(OAuthError::StateMismatch);
    }

    let (Some(shop), Some(_), Some(code)) = (query.shop(), query.hmac(), query.code()) else {
        return Err(OAuthError::InvalidCallback {
            reason: MISSING_PARAMETERS.to_string(),
        });
    };

    if !validate_hmac(query, config) {
        return Err(OAuthError::InvalidHmac);
    }

    let shop = ShopDomain::new(shop).map_err(|_| OAuthError::InvalidCallback {
        reason: format!("Invalid shop domain: {shop}"),
    })?;

    Ok(VerifiedCallback {
        shop,
        code: code.to_string(),
    })
}

/// Exchanges an authorization code for an access token.
///
/// POSTs `{client_id, client_secret, code}` to the shop's
/// `/admin/oauth/access_token` endpoint and returns the response body as-is.
///
/// # Errors
///
/// - [`OAuthError::TokenExchangeFailed`] when the endpoint answers non-2xx
/// - [`OAuthError::Network`] when it cannot be reached
pub async fn exchange_code(
    client: &reqwest::Client,
    config: &BridgeConfig,
    callback: &VerifiedCallback,
) -> Result<String, OAuthError> {
    let token_url = format!(
        "{}/admin/oauth/access_token",
        config.shop_origin(&callback.shop)
    );

    let request_body = AccessTokenRequest {
        client_id: config.api_key().as_ref(),
        client_secret: config.api_secret_key().as_ref(),
        code: &callback.code,
    };

    let response = client.post(&token_url).json(&request_body).send().await?;

    let status = response.status().as_u16();
    let body = response.text().await?;

    if !(200..300).contains(&status) {
        tracing::warn!(shop = %callback.shop, status, "access token exchange rejected");
        return Err(OAuthError::TokenExchangeFailed {
            status,
            message: body,
        });
    }

    tracing::info!(shop = %callback.shop, "access token issued");
    Ok(body)
}

/// Verifies a callback and exchanges its code, returning the raw token body.
///
/// # Errors
///
/// Any error of [`verify_callback`] or [`exchange_code`]. Nothing is sent
/// upstream unless verification succeeds.
///
/// # Example
///
/// ```rust,ignore
/// use catalog_bridge::auth::oauth::{validate_auth_callback, CallbackQuery};
///
/// let query = CallbackQuery::from_pairs(params);
/// let token_json = validate_auth_callback(&client, &config, &query, cookie.as_deref()).await?;
/// ```
pub async fn validate_auth_callback(
    client: &reqwest::Client,
    config: &BridgeConfig,
    query: &CallbackQuery,
    cookie_state: Option<&str>,
) -> Result<String, OAuthError> {
    let callback = verify_callback(config, query, cookie_state)?;
    exchange_code(client, config, &callback).await
}
