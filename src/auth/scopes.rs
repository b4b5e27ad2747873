//! OAuth scope set requested on the consent screen.

use crate::error::ConfigError;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A set of OAuth scopes.
///
/// Parsing adds the read scope implied by each write scope
/// (`write_products` implies `read_products`), and `Display` renders the set
/// sorted and comma-separated, which is the format the consent URL expects.
///
/// # Example
///
/// ```rust
/// use catalog_bridge::AuthScopes;
///
/// let scopes: AuthScopes = "write_products, read_orders".parse().unwrap();
/// assert_eq!(scopes.to_string(), "read_orders,read_products,write_products");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AuthScopes {
    scopes: BTreeSet<String>,
}

impl AuthScopes {
    /// An empty scope set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no scope is requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Iterates the scopes in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().map(String::as_str)
    }

    fn implied_scope(scope: &str) -> Option<String> {
        scope
            .strip_prefix("unauthenticated_write_")
            .map(|rest| format!("unauthenticated_read_{rest}"))
            .or_else(|| scope.strip_prefix("write_").map(|rest| format!("read_{rest}")))
    }
}

impl FromStr for AuthScopes {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut scopes = BTreeSet::new();

        for scope in s.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if !scope.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(ConfigError::InvalidScopes {
                    reason: format!("Invalid characters in scope: '{scope}'"),
                });
            }
            if let Some(implied) = Self::implied_scope(scope) {
                scopes.insert(implied);
            }
            scopes.insert(scope.to_string());
        }

        Ok(Self { scopes })
    }
}

impl fmt::Display for AuthScopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.iter().collect::<Vec<_>>().join(",");
        f.write_str(&joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_comma_separated_scopes() {
        let scopes: AuthScopes = "read_products,read_orders".parse().unwrap();
        assert_eq!(scopes.iter().count(), 2);
    }

    #[test]
    fn test_write_implies_read() {
        let scopes: AuthScopes = "write_products".parse().unwrap();
        assert!(scopes.iter().any(|s| s == "read_products"));

        let scopes: AuthScopes = "unauthenticated_write_checkouts".parse().unwrap();
        assert!(scopes.iter().any(|s| s == "unauthenticated_read_checkouts"));
    }

    #[test]
    fn test_ignores_blank_entries() {
        let scopes: AuthScopes = " , read_products,, ".parse().unwrap();
        assert_eq!(scopes.to_string(), "read_products");
        assert!("".parse::<AuthScopes>().unwrap().is_empty());
    }

    #[test]
    fn test_rejects_invalid_characters() {
        let result = "read products".parse::<AuthScopes>();
        assert!(matches!(result, Err(ConfigError::InvalidScopes { .. })));
    }

    #[test]
    fn test_display_is_sorted_and_deduplicated() {
        let scopes: AuthScopes = "write_products,read_products,read_orders".parse().unwrap();
        assert_eq!(
            scopes.to_string(),
            "read_orders,read_products,write_products"
        );
    }
}
