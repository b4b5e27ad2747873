//! Validated newtype wrappers for configuration and request values.
//!
//! Each wrapper validates on construction, so a value that exists is a value
//! that can be used to build a URL or sign a message.

use crate::error::ConfigError;
use std::fmt;

/// The app's client identifier as issued by the Partner dashboard.
///
/// # Example
///
/// ```rust
/// use catalog_bridge::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The app's shared secret, used to sign OAuth callbacks and to exchange
/// authorization codes.
///
/// `Debug` output is masked so the secret never reaches the logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiSecretKey(String);

impl ApiSecretKey {
    /// Creates a new validated secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiSecretKey`] if the secret is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiSecretKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiSecretKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiSecretKey(*****)")
    }
}

/// A storefront domain, always in its full `name.myshopify.com` form.
///
/// Both `my-store` and `my-store.myshopify.com` are accepted; input is
/// trimmed and lowercased.
///
/// # Example
///
/// ```rust
/// use catalog_bridge::ShopDomain;
///
/// let shop = ShopDomain::new("My-Store").unwrap();
/// assert_eq!(shop.as_ref(), "my-store.myshopify.com");
/// assert_eq!(shop.shop_name(), "my-store");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopDomain {
    full_domain: String,
    shop_name_end: usize,
}

impl ShopDomain {
    const SUFFIX: &'static str = ".myshopify.com";

    /// Parses and normalizes a shop domain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShopDomain`] for empty input, foreign
    /// domains, or names with characters other than `a-z`, `0-9` and `-`.
    pub fn new(domain: impl Into<String>) -> Result<Self, ConfigError> {
        let domain = domain.into().trim().to_lowercase();

        if domain.is_empty() {
            return Err(ConfigError::InvalidShopDomain { domain });
        }

        let (shop_name, full_domain) = if let Some(shop_name) = domain.strip_suffix(Self::SUFFIX) {
            (shop_name.to_string(), domain)
        } else if domain.contains('.') {
            return Err(ConfigError::InvalidShopDomain { domain });
        } else {
            (domain.clone(), format!("{domain}{}", Self::SUFFIX))
        };

        if !Self::is_valid_shop_name(&shop_name) {
            return Err(ConfigError::InvalidShopDomain {
                domain: full_domain,
            });
        }

        Ok(Self {
            shop_name_end: shop_name.len(),
            full_domain,
        })
    }

    /// The shop name without the `.myshopify.com` suffix.
    #[must_use]
    pub fn shop_name(&self) -> &str {
        &self.full_domain[..self.shop_name_end]
    }

    /// `https://{domain}`, the default origin for every upstream call.
    #[must_use]
    pub fn origin(&self) -> String {
        format!("https://{}", self.full_domain)
    }

    fn is_valid_shop_name(name: &str) -> bool {
        if name.is_empty() || name.starts_with('-') || name.ends_with('-') {
            return false;
        }

        name.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}

impl AsRef<str> for ShopDomain {
    fn as_ref(&self) -> &str {
        &self.full_domain
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_domain)
    }
}

/// An absolute URL with a scheme and a host; trailing slashes are dropped so
/// paths can be appended with [`HostUrl::join`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl HostUrl {
    /// Parses and validates a URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] when the scheme or host is
    /// missing.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidHostUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidHostUrl { url });
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidHostUrl { url });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// The URL scheme (`http`, `https`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// The host portion, without port or path.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Whether the URL uses TLS.
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.scheme().eq_ignore_ascii_case("https")
    }

    /// Appends an absolute path (`/callback`) to the URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_rejects_empty_string() {
        assert!(matches!(ApiKey::new(""), Err(ConfigError::EmptyApiKey)));
        assert!(matches!(ApiKey::new("   "), Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn test_api_secret_key_masks_value_in_debug() {
        let secret = ApiSecretKey::new("super-secret-key").unwrap();
        let debug_output = format!("{secret:?}");
        assert_eq!(debug_output, "ApiSecretKey(*****)");
    }

    #[test]
    fn test_shop_domain_normalizes_short_format() {
        let domain = ShopDomain::new("my-store").unwrap();
        assert_eq!(domain.as_ref(), "my-store.myshopify.com");
        assert_eq!(domain.shop_name(), "my-store");
        assert_eq!(domain.origin(), "https://my-store.myshopify.com");
    }

    #[test]
    fn test_shop_domain_accepts_full_format() {
        let domain = ShopDomain::new(" My-Store.myshopify.com ").unwrap();
        assert_eq!(domain.as_ref(), "my-store.myshopify.com");
        assert_eq!(domain.to_string(), "my-store.myshopify.com");
    }

    #[test]
    fn test_shop_domain_rejects_invalid_domains() {
        assert!(ShopDomain::new("").is_err());
        assert!(ShopDomain::new("my store").is_err());
        assert!(ShopDomain::new("my_store").is_err());
        assert!(ShopDomain::new("-my-store").is_err());
        assert!(ShopDomain::new("my-store-").is_err());
        assert!(ShopDomain::new("evil.example.com").is_err());
        assert!(ShopDomain::new(".myshopify.com").is_err());
    }

    #[test]
    fn test_host_url_parses_parts() {
        let url = HostUrl::new("https://bridge.example.com:8443/").unwrap();
        assert_eq!(url.as_ref(), "https://bridge.example.com:8443");
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), "bridge.example.com");
        assert!(url.is_https());
    }

    #[test]
    fn test_host_url_join() {
        let url = HostUrl::new("http://127.0.0.1:8081/").unwrap();
        assert_eq!(url.join("/callback"), "http://127.0.0.1:8081/callback");
        assert_eq!(url.join("callback"), "http://127.0.0.1:8081/callback");
        assert!(!url.is_https());
    }

    #[test]
    fn test_host_url_rejects_invalid() {
        assert!(HostUrl::new("bridge.example.com").is_err());
        assert!(HostUrl::new("://bridge.example.com").is_err());
        assert!(HostUrl::new("https://").is_err());
        assert!(HostUrl::new("ht3p://host").is_err());
    }
}
