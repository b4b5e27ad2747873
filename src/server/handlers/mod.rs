//! Route handlers.

pub mod oauth;
pub mod products;

use axum::Json;
use serde::Serialize;

use crate::clients::BRIDGE_VERSION;

/// Body of `GET /healthz`.
#[derive(Debug, Serialize)]
pub struct Health {
    /// Always `"ok"` while the process serves requests.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
}

/// Liveness probe. Does not touch the platform.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: BRIDGE_VERSION,
    })
}
