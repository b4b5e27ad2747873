//! HMAC-SHA256 signing and verification of OAuth callbacks.
//!
//! The platform signs the callback query with the app's shared secret; the
//! bridge recomputes the signature over [`CallbackQuery::to_signable_string`]
//! and compares the two hex digests in constant time.
//!
//! # Example
//!
//! ```rust
//! use catalog_bridge::auth::oauth::hmac::{compute_signature, constant_time_compare};
//!
//! let signature = compute_signature("code=abc&shop=demo.myshopify.com", "secret");
//! assert_eq!(signature.len(), 64);
//! assert!(constant_time_compare(
//!     &signature,
//!     &compute_signature("code=abc&shop=demo.myshopify.com", "secret"),
//! ));
//! ```

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::auth::oauth::CallbackQuery;
use crate::config::BridgeConfig;

type HmacSha256 = Hmac<Sha256>;

/// Lowercase hex HMAC-SHA256 of `message` keyed by `secret`.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature(message: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Compares two strings without short-circuiting on the first difference.
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    // ConstantTimeEq handles different lengths securely
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Checks the callback's `hmac` against the current secret, then the previous
/// one if a rotation is configured.
#[must_use]
pub fn validate_hmac(query: &CallbackQuery, config: &BridgeConfig) -> bool {
    let Some(received) = query.hmac() else {
        return false;
    };
    let signable = query.to_signable_string();

    let computed = compute_signature(&signable, config.api_secret_key().as_ref());
    if constant_time_compare(&computed, received) {
        return true;
    }

    config.old_api_secret_key().is_some_and(|old_secret| {
        let computed_old = compute_signature(&signable, old_secret.as_ref());
        constant_time_compare(&computed_old, received)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, ApiSecretKey};

    fn config_with(secret: &str, old: Option<&str>) -> BridgeConfig {
        let mut builder = BridgeConfig::builder()
            .api_key(ApiKey::new("test-key").unwrap())
            .api_secret_key(ApiSecretKey::new(secret).unwrap());
        if let Some(old) = old {
            builder = builder.old_api_secret_key(ApiSecretKey::new(old).unwrap());
        }
        builder.build().unwrap()
    }

    fn signed_query(secret: &str) -> CallbackQuery {
        let mut query = CallbackQuery::from_pairs([
            ("code", "auth-code"),
            ("shop", "test-shop.myshopify.com"),
            ("state", "state-value"),
            ("timestamp", "1234567890"),
        ]);
        let signature = compute_signature(&query.to_signable_string(), secret);
        query.set("hmac", signature);
        query
    }

    #[test]
    fn test_compute_signature_matches_known_value() {
        // HMAC-SHA256("message", "key")
        assert_eq!(
            compute_signature("message", "key"),
            "6e9ef29b75fffc5b7abae527d58fdadb2fe42e7219011976917343065f58ed4a"
        );
    }

    #[test]
    fn test_compute_signature_is_deterministic() {
        let message = "code=a&shop=b&state=c";
        assert_eq!(
            compute_signature(message, "secret"),
            compute_signature(message, "secret")
        );
        assert_ne!(
            compute_signature(message, "secret"),
            compute_signature(message, "other-secret")
        );
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc123", "abc123"));
        assert!(constant_time_compare("", ""));
        assert!(!constant_time_compare("abc123", "abc124"));
        assert!(!constant_time_compare("short", "longer string"));
    }

    #[test]
    fn test_validate_hmac_succeeds_with_correct_hmac() {
        let config = config_with("test-secret", None);
        assert!(validate_hmac(&signed_query("test-secret"), &config));
    }

    #[test]
    fn test_validate_hmac_rejects_tampered_parameter() {
        let config = config_with("test-secret", None);
        let mut query = signed_query("test-secret");
        query.set("code", "auth-codf");
        assert!(!validate_hmac(&query, &config));
    }

    #[test]
    fn test_validate_hmac_rejects_missing_hmac() {
        let config = config_with("test-secret", None);
        let query = CallbackQuery::from_pairs([("code", "c"), ("shop", "s")]);
        assert!(!validate_hmac(&query, &config));
    }

    #[test]
    fn test_validate_hmac_falls_back_to_old_secret() {
        let config = config_with("new-secret", Some("old-secret"));
        assert!(validate_hmac(&signed_query("old-secret"), &config));
        assert!(!validate_hmac(&signed_query("unknown-secret"), &config));
    }
}
