//! Anti-forgery state token for the authorization round trip.
//!
//! A fresh [`StateParam`] is generated for every `/authorize` request. The
//! same value is written to the `state` cookie and embedded in the consent
//! URL; the callback is only honoured when both come back identical.

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fmt;

use super::hmac::constant_time_compare;

/// OAuth state parameter.
///
/// # Example
///
/// ```rust
/// use catalog_bridge::auth::oauth::StateParam;
///
/// let state = StateParam::new();
/// assert_eq!(state.as_ref().len(), 15);
/// assert!(state.matches(state.as_ref()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateParam {
    value: String,
}

impl StateParam {
    const NONCE_LENGTH: usize = 15;

    /// Generates a new alphanumeric nonce from the thread-local CSPRNG.
    #[must_use]
    pub fn new() -> Self {
        let value: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::NONCE_LENGTH)
            .map(char::from)
            .collect();

        Self { value }
    }

    /// Wraps an existing value, e.g. one read back from a cookie.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self { value: raw.into() }
    }

    /// Constant-time comparison against a received state value.
    #[must_use]
    pub fn matches(&self, received: &str) -> bool {
        constant_time_compare(&self.value, received)
    }
}

impl Default for StateParam {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StateParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for StateParam {
    fn as_ref(&self) -> &str {
        &self.value
    }
}
