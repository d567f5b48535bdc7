//! HTTP transport.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /api/health` | liveness and model spec |
//! | `GET /api/modes` | mode catalogue |
//! | `POST /api/triage` | turn analysis without a model call |
//! | `POST /api/chat` | full turn |
//! | `POST /api/handoff` | panel hand-off suggestion |

pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::coach::Coach;
use crate::config::ServerConfig;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// Turn handler.
    pub coach: Arc<Coach>,
}

/// CORS layer for the configured origins. `*` allows any origin; entries that
/// are not valid header values are skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o.trim() == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|origin| origin.trim().parse::<HeaderValue>().ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([HeaderName::from_static("content-type")])
        .max_age(Duration::from_secs(3600))
}

/// Build the application router.
pub fn router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/modes", get(routes::modes))
        .route("/api/triage", post(routes::triage))
        .route("/api/chat", post(routes::chat))
        .route("/api/handoff", post(routes::handoff))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&server.cors_origins)),
        )
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(state: AppState, server: &ServerConfig) -> anyhow::Result<()> {
    let app = router(state, server);
    let listener = tokio::net::TcpListener::bind(&server.bind)
        .await
        .with_context(|| format!("failed to bind {}", server.bind))?;
    info!(addr = %server.bind, "visi listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("visi stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
