//! HTTP surface of the bridge.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /authorize` | [`handlers::oauth::authorize`] |
//! | `GET /callback` | [`handlers::oauth::callback`] |
//! | `POST /products:create` | [`handlers::products::create`] |
//! | `POST /products:update` | [`handlers::products::update`] |
//! | `POST /products:delete` | [`handlers::products::delete`] |
//! | `GET /products:checkSentinel` | [`handlers::products::check_sentinel`] |
//! | `GET /products:list` | [`handlers::products::list`] |
//! | `GET /healthz` | [`handlers::health`] |

mod error;
mod extract;
pub mod handlers;

pub use error::ApiError;
pub use extract::{cookie_value, ShopAuth, SHOP_HEADER};

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use thiserror::Error;
use tower_http::trace::TraceLayer;

use crate::clients::build_reqwest_client;
use crate::config::{BridgeConfig, CALLBACK_PATH};

/// Shared, read-only request state.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Configuration loaded at start-up.
    pub config: Arc<BridgeConfig>,
    /// Pooled client for every upstream call.
    pub http: reqwest::Client,
}

impl AppState {
    /// Builds the state, including the pooled HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::HttpClient`] if the TLS backend fails to load.
    pub fn new(config: BridgeConfig) -> Result<Self, ServerError> {
        Ok(Self {
            config: Arc::new(config),
            http: build_reqwest_client()?,
        })
    }
}

/// Failures while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The upstream HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Binding or serving failed.
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds the router with every route and the request trace layer.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::health))
        .route("/authorize", get(handlers::oauth::authorize))
        .route(CALLBACK_PATH, get(handlers::oauth::callback))
        .route("/products:create", post(handlers::products::create))
        .route("/products:update", post(handlers::products::update))
        .route("/products:delete", post(handlers::products::delete))
        .route(
            "/products:checkSentinel",
            get(handlers::products::check_sentinel),
        )
        .route("/products:list", get(handlers::products::list))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns [`ServerError`] if the client cannot be built or the socket
/// cannot be bound.
pub async fn run_server(config: BridgeConfig) -> Result<(), ServerError> {
    let addr = config.listen_addr();
    let app = create_app(AppState::new(config)?);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("catalog bridge listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
