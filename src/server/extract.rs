//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use cookie::Cookie;

use crate::auth::ShopCredentials;
use crate::config::ShopDomain;
use crate::server::error::ApiError;

/// Header naming the shop a catalog call targets.
pub const SHOP_HEADER: &str = "shop";

/// Caller credentials read from the `shop` and `authorization` headers.
///
/// `authorization` may carry the raw access token or `Bearer <token>`.
#[derive(Debug, Clone)]
pub struct ShopAuth(pub ShopCredentials);

impl<S> FromRequestParts<S> for ShopAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let shop = header_str(&parts.headers, SHOP_HEADER)
            .ok_or_else(|| ApiError::BadRequest(format!("Missing \"{SHOP_HEADER}\" header")))?;
        let shop = ShopDomain::new(shop).map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let token = header_str(&parts.headers, AUTHORIZATION.as_str())
            .map(bearer_token)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::BadRequest("Missing \"authorization\" header".to_string()))?;

        Ok(Self(ShopCredentials::new(shop, token)))
    }
}

fn bearer_token(value: &str) -> &str {
    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim(),
        None if value.eq_ignore_ascii_case("bearer") => "",
        _ => value,
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Value of cookie `name` across every `Cookie` header.
///
/// Malformed pairs are skipped.
#[must_use]
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request};

    async fn extract(request: Request<()>) -> Result<ShopAuth, ApiError> {
        let (mut parts, ()) = request.into_parts();
        ShopAuth::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_shop_auth_accepts_raw_token() {
        let request = Request::builder()
            .header("shop", "demo")
            .header("authorization", "shpat_abc")
            .body(())
            .unwrap();

        let ShopAuth(credentials) = extract(request).await.unwrap();
        assert_eq!(credentials.shop.as_ref(), "demo.myshopify.com");
        assert_eq!(credentials.access_token, "shpat_abc");
    }

    #[tokio::test]
    async fn test_shop_auth_strips_bearer_prefix() {
        let request = Request::builder()
            .header("shop", "demo.myshopify.com")
            .header("authorization", "Bearer shpat_abc")
            .body(())
            .unwrap();

        let ShopAuth(credentials) = extract(request).await.unwrap();
        assert_eq!(credentials.access_token, "shpat_abc");
    }

    #[tokio::test]
    async fn test_shop_auth_requires_both_headers() {
        let no_token = Request::builder().header("shop", "demo").body(()).unwrap();
        assert!(matches!(extract(no_token).await, Err(ApiError::BadRequest(_))));

        let no_shop = Request::builder()
            .header("authorization", "shpat_abc")
            .body(())
            .unwrap();
        assert!(matches!(extract(no_shop).await, Err(ApiError::BadRequest(_))));

        let bare_bearer = Request::builder()
            .header("shop", "demo")
            .header("authorization", "Bearer ")
            .body(())
            .unwrap();
        assert!(matches!(extract(bare_bearer).await, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_cookie_value_finds_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark; state=abc123"));
        headers.append(COOKIE, HeaderValue::from_static("other=1"));

        assert_eq!(cookie_value(&headers, "state"), Some("abc123".to_string()));
        assert_eq!(cookie_value(&headers, "other"), Some("1".to_string()));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_cookie_value_skips_malformed_pairs() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("garbage; state=abc123"));

        assert_eq!(cookie_value(&headers, "state"), Some("abc123".to_string()));
    }
}
