//! Bridge configuration.
//!
//! [`BridgeConfig`] is built once at start-up, either programmatically through
//! [`BridgeConfigBuilder`] or from the process environment with
//! [`BridgeConfig::from_env`], and then shared read-only with every request
//! handler. There is no global configuration state.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPIFY_API_KEY` - app client id
//! - `SHOPIFY_API_SECRET` - app shared secret
//! - `HOST` - public base URL of this service (OAuth callback is `{HOST}/callback`)
//!
//! ## Optional
//! - `SHOPIFY_API_SECRET_OLD` - previous secret, still accepted for callback HMACs
//! - `SCOPES` - comma-separated OAuth scopes
//! - `SHOPIFY_API_VERSION` - Admin API version (default: latest known)
//! - `SHOPIFY_UPSTREAM_URL` - send all upstream calls to this origin instead of the shop
//! - `BIND_ADDR` - listen address (default: 0.0.0.0)
//! - `PORT` - listen port (default: 8081)
//! - `LOG_FORMAT` - `text` or `json` (default: text)
//!
//! # Example
//!
//! ```rust
//! use catalog_bridge::{ApiKey, ApiSecretKey, BridgeConfig, HostUrl};
//!
//! let config = BridgeConfig::builder()
//!     .api_key(ApiKey::new("client-id").unwrap())
//!     .api_secret_key(ApiSecretKey::new("client-secret").unwrap())
//!     .host(HostUrl::new("https://bridge.example.com").unwrap())
//!     .scopes("write_products".parse().unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.callback_url().unwrap(), "https://bridge.example.com/callback");
//! ```

mod newtypes;
mod version;

pub use newtypes::{ApiKey, ApiSecretKey, HostUrl, ShopDomain};
pub use version::ApiVersion;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use crate::auth::AuthScopes;
use crate::error::ConfigError;

/// Path of the OAuth callback route, relative to the public host.
pub const CALLBACK_PATH: &str = "/callback";

const DEFAULT_PORT: u16 = 8081;

/// Output format of the tracing subscriber.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::InvalidEnvVar {
                name: "LOG_FORMAT",
                reason: format!("expected 'text' or 'json', got '{other}'"),
            }),
        }
    }
}

/// Immutable configuration shared by every handler.
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    api_key: ApiKey,
    api_secret_key: ApiSecretKey,
    old_api_secret_key: Option<ApiSecretKey>,
    scopes: AuthScopes,
    host: Option<HostUrl>,
    api_version: ApiVersion,
    upstream_url: Option<HostUrl>,
    listen_addr: SocketAddr,
    log_format: LogFormat,
}

impl BridgeConfig {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> BridgeConfigBuilder {
        BridgeConfigBuilder::new()
    }

    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first missing or malformed variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first missing or malformed variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &'static str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::MissingEnvVar { name });

        let mut builder = Self::builder()
            .api_key(ApiKey::new(required("SHOPIFY_API_KEY")?)?)
            .api_secret_key(ApiSecretKey::new(required("SHOPIFY_API_SECRET")?)?)
            .host(HostUrl::new(required("HOST")?)?);

        if let Some(old) = var("SHOPIFY_API_SECRET_OLD") {
            builder = builder.old_api_secret_key(ApiSecretKey::new(old)?);
        }
        if let Some(scopes) = var("SCOPES") {
            builder = builder.scopes(scopes.parse()?);
        }
        if let Some(version) = var("SHOPIFY_API_VERSION") {
            builder = builder.api_version(version.parse()?);
        }
        if let Some(upstream) = var("SHOPIFY_UPSTREAM_URL") {
            builder = builder.upstream_url(HostUrl::new(upstream)?);
        }
        if let Some(format) = var("LOG_FORMAT") {
            builder = builder.log_format(format.parse()?);
        }

        let ip = match var("BIND_ADDR") {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    name: "BIND_ADDR",
                    reason: e.to_string(),
                })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    name: "PORT",
                    reason: e.to_string(),
                })?,
            None => DEFAULT_PORT,
        };

        builder.listen_addr(SocketAddr::new(ip, port)).build()
    }

    /// The app's client id.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// The app's shared secret.
    #[must_use]
    pub const fn api_secret_key(&self) -> &ApiSecretKey {
        &self.api_secret_key
    }

    /// The previous shared secret, if a rotation is in progress.
    #[must_use]
    pub const fn old_api_secret_key(&self) -> Option<&ApiSecretKey> {
        self.old_api_secret_key.as_ref()
    }

    /// Scopes requested on the consent screen.
    #[must_use]
    pub const fn scopes(&self) -> &AuthScopes {
        &self.scopes
    }

    /// Public base URL of this service.
    #[must_use]
    pub const fn host(&self) -> Option<&HostUrl> {
        self.host.as_ref()
    }

    /// Fixed OAuth redirect target, `None` when no host is configured.
    #[must_use]
    pub fn callback_url(&self) -> Option<String> {
        self.host.as_ref().map(|host| host.join(CALLBACK_PATH))
    }

    /// Admin API version used for catalog calls.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Origin override for upstream calls.
    #[must_use]
    pub const fn upstream_url(&self) -> Option<&HostUrl> {
        self.upstream_url.as_ref()
    }

    /// Origin that serves `shop`'s OAuth and Admin endpoints.
    #[must_use]
    pub fn shop_origin(&self, shop: &ShopDomain) -> String {
        self.upstream_url
            .as_ref()
            .map_or_else(|| shop.origin(), |url| url.as_ref().to_string())
    }

    /// Socket address the HTTP server binds to.
    #[must_use]
    pub const fn listen_addr(&self) -> SocketAddr {
        self.listen_addr
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

// Verify BridgeConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BridgeConfig>();
};

/// Builder for [`BridgeConfig`].
#[derive(Debug, Default)]
pub struct BridgeConfigBuilder {
    api_key: Option<ApiKey>,
    api_secret_key: Option<ApiSecretKey>,
    old_api_secret_key: Option<ApiSecretKey>,
    scopes: Option<AuthScopes>,
    host: Option<HostUrl>,
    api_version: Option<ApiVersion>,
    upstream_url: Option<HostUrl>,
    listen_addr: Option<SocketAddr>,
    log_format: Option<LogFormat>,
}

impl BridgeConfigBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the client id (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the shared secret (required).
    #[must_use]
    pub fn api_secret_key(mut self, key: ApiSecretKey) -> Self {
        self.api_secret_key = Some(key);
        self
    }

    /// Sets the previous shared secret.
    #[must_use]
    pub fn old_api_secret_key(mut self, key: ApiSecretKey) -> Self {
        self.old_api_secret_key = Some(key);
        self
    }

    /// Sets the requested scopes.
    #[must_use]
    pub fn scopes(mut self, scopes: AuthScopes) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// Sets the public base URL.
    #[must_use]
    pub fn host(mut self, host: HostUrl) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the Admin API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Routes every upstream call to `url` instead of the shop's own origin.
    #[must_use]
    pub fn upstream_url(mut self, url: HostUrl) -> Self {
        self.upstream_url = Some(url);
        self
    }

    /// Sets the listen address.
    #[must_use]
    pub const fn listen_addr(mut self, addr: SocketAddr) -> Self {
        self.listen_addr = Some(addr);
        self
    }

    /// Sets the log format.
    #[must_use]
    pub const fn log_format(mut self, format: LogFormat) -> Self {
        self.log_format = Some(format);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if the client id or
    /// secret was not set.
    pub fn build(self) -> Result<BridgeConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;
        let api_secret_key = self
            .api_secret_key
            .ok_or(ConfigError::MissingRequiredField {
                field: "api_secret_key",
            })?;

        Ok(BridgeConfig {
            api_key,
            api_secret_key,
            old_api_secret_key: self.old_api_secret_key,
            scopes: self.scopes.unwrap_or_default(),
            host: self.host,
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            upstream_url: self.upstream_url,
            listen_addr: self.listen_addr.unwrap_or_else(|| {
                SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT)
            }),
            log_format: self.log_format.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    const BASE_VARS: &[(&str, &str)] = &[
        ("SHOPIFY_API_KEY", "client-id"),
        ("SHOPIFY_API_SECRET", "client-secret"),
        ("HOST", "https://bridge.example.com"),
    ];

    #[test]
    fn test_builder_requires_api_key() {
        let result = BridgeConfigBuilder::new()
            .api_secret_key(ApiSecretKey::new("secret").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_key" })
        ));
    }

    #[test]
    fn test_builder_requires_api_secret_key() {
        let result = BridgeConfigBuilder::new()
            .api_key(ApiKey::new("key").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "api_secret_key"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = BridgeConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret_key(ApiSecretKey::new("secret").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.api_version(), &ApiVersion::latest());
        assert!(config.scopes().is_empty());
        assert!(config.host().is_none());
        assert!(config.callback_url().is_none());
        assert!(config.upstream_url().is_none());
        assert_eq!(config.listen_addr().port(), 8081);
        assert_eq!(config.log_format(), LogFormat::Text);
    }

    #[test]
    fn test_shop_origin_prefers_upstream_override() {
        let shop = ShopDomain::new("demo").unwrap();
        let config = BridgeConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret_key(ApiSecretKey::new("secret").unwrap())
            .build()
            .unwrap();
        assert_eq!(config.shop_origin(&shop), "https://demo.myshopify.com");

        let config = BridgeConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret_key(ApiSecretKey::new("secret").unwrap())
            .upstream_url(HostUrl::new("http://127.0.0.1:9000/").unwrap())
            .build()
            .unwrap();
        assert_eq!(config.shop_origin(&shop), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_from_lookup_with_required_vars_only() {
        let config = BridgeConfig::from_lookup(lookup_from(BASE_VARS)).unwrap();

        assert_eq!(config.api_key().as_ref(), "client-id");
        assert_eq!(
            config.callback_url().as_deref(),
            Some("https://bridge.example.com/callback")
        );
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:8081");
    }

    #[test]
    fn test_from_lookup_reads_optional_vars() {
        let mut vars = BASE_VARS.to_vec();
        vars.extend([
            ("SHOPIFY_API_SECRET_OLD", "old-secret"),
            ("SCOPES", "write_products"),
            ("SHOPIFY_API_VERSION", "2025-04"),
            ("SHOPIFY_UPSTREAM_URL", "http://localhost:9999"),
            ("BIND_ADDR", "127.0.0.1"),
            ("PORT", "3000"),
            ("LOG_FORMAT", "json"),
        ]);
        let config = BridgeConfig::from_lookup(lookup_from(&vars)).unwrap();

        assert!(config.old_api_secret_key().is_some());
        assert!(config.scopes().iter().any(|s| s == "read_products"));
        assert_eq!(config.api_version(), &ApiVersion::V2025_04);
        assert_eq!(
            config.upstream_url().map(AsRef::as_ref),
            Some("http://localhost:9999")
        );
        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.log_format(), LogFormat::Json);
    }

    #[test]
    fn test_from_lookup_reports_missing_var() {
        let result = BridgeConfig::from_lookup(lookup_from(&[("SHOPIFY_API_KEY", "id")]));
        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingEnvVar {
                name: "SHOPIFY_API_SECRET"
            }
        );
    }

    #[test]
    fn test_from_lookup_treats_empty_as_missing() {
        let mut vars = BASE_VARS.to_vec();
        vars[2] = ("HOST", "  ");
        let result = BridgeConfig::from_lookup(lookup_from(&vars));
        assert_eq!(result.unwrap_err(), ConfigError::MissingEnvVar { name: "HOST" });
    }

    #[test]
    fn test_from_lookup_rejects_bad_port() {
        let mut vars = BASE_VARS.to_vec();
        vars.push(("PORT", "eighty"));
        let result = BridgeConfig::from_lookup(lookup_from(&vars));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvVar { name: "PORT", .. })
        ));
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
