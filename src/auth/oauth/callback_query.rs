//! Query parameters of the OAuth callback.

/// Every query parameter received on the callback, in arrival order.
///
/// All parameters take part in the HMAC, not only the well-known ones, so the
/// query is kept as raw pairs rather than a fixed struct.
///
/// # Example
///
/// ```rust
/// use catalog_bridge::auth::oauth::CallbackQuery;
///
/// let query = CallbackQuery::from_pairs([
///     ("shop", "demo.myshopify.com"),
///     ("code", "abc"),
///     ("hmac", "deadbeef"),
/// ]);
/// assert_eq!(query.code(), Some("abc"));
/// assert_eq!(query.to_signable_string(), "code=abc&shop=demo.myshopify.com");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallbackQuery {
    params: Vec<(String, String)>,
}

impl CallbackQuery {
    /// Parameters excluded from the signed message.
    const UNSIGNED: [&'static str; 2] = ["hmac", "signature"];

    /// Builds a query from key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            params: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// First value for `key`, ignoring empty values.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }

    /// The `shop` parameter.
    #[must_use]
    pub fn shop(&self) -> Option<&str> {
        self.get("shop")
    }

    /// The `code` parameter.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.get("code")
    }

    /// The `hmac` parameter.
    #[must_use]
    pub fn hmac(&self) -> Option<&str> {
        self.get("hmac")
    }

    /// The `state` parameter.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.get("state")
    }

    /// Replaces (or adds) the value for `key`.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.params.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value;
        } else {
            self.params.push((key.to_string(), value));
        }
    }

    /// Canonical message covered by the callback HMAC.
    ///
    /// `hmac` and `signature` are dropped, the rest are sorted by key and
    /// joined as `key=value` with `&`. `%` and `&` are escaped in keys and
    /// values, `=` additionally in keys.
    #[must_use]
    pub fn to_signable_string(&self) -> String {
        let mut pairs: Vec<(String, String)> = self
            .params
            .iter()
            .filter(|(k, _)| !Self::UNSIGNED.contains(&k.as_str()))
            .map(|(k, v)| (escape(k, true), escape(v, false)))
            .collect();

        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn escape(raw: &str, is_key: bool) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            '&' => escaped.push_str("%26"),
            '=' if is_key => escaped.push_str("%3D"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CallbackQuery {
        CallbackQuery::from_pairs([
            ("timestamp", "1700000000"),
            ("state", "nonce"),
            ("shop", "demo.myshopify.com"),
            ("hmac", "ignored"),
            ("code", "auth-code"),
            ("host", "ZGVtbw=="),
            ("signature", "ignored-too"),
        ])
    }

    #[test]
    fn test_signable_string_sorts_and_drops_unsigned() {
        assert_eq!(
            sample().to_signable_string(),
            "code=auth-code&host=ZGVtbw==&shop=demo.myshopify.com&state=nonce&timestamp=1700000000"
        );
    }

    #[test]
    fn test_signable_string_escapes_reserved_characters() {
        let query = CallbackQuery::from_pairs([("a=b", "x&y"), ("pct", "100%")]);
        assert_eq!(query.to_signable_string(), "a%3Db=x%26y&pct=100%25");
    }

    #[test]
    fn test_accessors_ignore_empty_values() {
        let query = CallbackQuery::from_pairs([("shop", ""), ("code", "c")]);
        assert_eq!(query.shop(), None);
        assert_eq!(query.code(), Some("c"));
        assert_eq!(query.hmac(), None);
    }

    #[test]
    fn test_set_replaces_existing_value() {
        let mut query = sample();
        query.set("hmac", "new");
        assert_eq!(query.hmac(), Some("new"));
        query.set("extra", "1");
        assert_eq!(query.get("extra"), Some("1"));
    }
}
