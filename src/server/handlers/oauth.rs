//! `/authorize` and `/callback`.

use axum::extract::{Query, State};
use axum::http::header::{CONTENT_TYPE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use cookie::{Cookie, SameSite};
use serde::Deserialize;

use crate::auth::oauth::{begin_auth, validate_auth_callback, CallbackQuery};
use crate::config::{HostUrl, ShopDomain};
use crate::server::error::ApiError;
use crate::server::extract::cookie_value;
use crate::server::AppState;

/// Name of the cookie carrying the OAuth state between the two legs.
pub const STATE_COOKIE: &str = "state";

const MISSING_SHOP: &str = "Missing \"Shop Name\" parameter!!";

/// Query of `GET /authorize`.
#[derive(Debug, Deserialize)]
pub struct AuthorizeParams {
    /// Shop name or `*.myshopify.com` domain.
    pub shop: Option<String>,
}

/// Starts the handshake: 302 to the consent screen with a fresh state cookie.
pub async fn authorize(
    State(state): State<AppState>,
    Query(params): Query<AuthorizeParams>,
) -> Result<Response, ApiError> {
    let shop = params
        .shop
        .as_deref()
        .map(str::trim)
        .filter(|shop| !shop.is_empty())
        .ok_or_else(|| ApiError::BadRequest(MISSING_SHOP.to_string()))?;
    let shop = ShopDomain::new(shop).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let started = begin_auth(&state.config, &shop)?;
    let secure = state.config.host().is_some_and(HostUrl::is_https);

    tracing::info!(shop = %shop, "redirecting to consent screen");

    Ok((
        StatusCode::FOUND,
        [
            (LOCATION, started.auth_url),
            (SET_COOKIE, state_cookie(started.state.as_ref(), secure).to_string()),
        ],
    )
        .into_response())
}

/// Completes the handshake and relays the token endpoint's JSON.
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let query = CallbackQuery::from_pairs(params);
    let stored_state = cookie_value(&headers, STATE_COOKIE);

    let body = validate_auth_callback(
        &state.http,
        &state.config,
        &query,
        stored_state.as_deref(),
    )
    .await?;

    Ok(([(CONTENT_TYPE, "application/json")], body).into_response())
}

fn state_cookie(value: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((STATE_COOKIE, value.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}
