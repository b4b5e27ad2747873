//! Tracing subscriber set-up.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{BridgeConfig, LogFormat};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "catalog_bridge=info,tower_http=info";

/// Installs the global subscriber: `RUST_LOG` filtering plus a text or JSON
/// formatter depending on [`BridgeConfig::log_format`].
///
/// # Errors
///
/// Returns [`TryInitError`] if a global subscriber is already installed.
pub fn init_subscriber(config: &BridgeConfig) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (json, text) = match config.log_format() {
        LogFormat::Json => (Some(fmt::layer().json()), None),
        LogFormat::Text => (None, Some(fmt::layer())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .try_init()
}
