use crate::api_errors::AppError;
use crate::app_state::AppState;
use crate::config::ServiceConfig;
use crate::version::{Version, VersionPayload};
use anyhow::Context;
use axum::{extract::State, http::Uri, response::Json, routing::get, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "ok")]
    pub status: String,
}

/// Build the service router: `/version`, `/healthz`, and a JSON 404 fallback.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/version", get(version))
        .route("/healthz", get(healthz))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Report the running service's version.
#[utoipa::path(
    get,
    path = "/version",
    tag = "admin",
    responses(
        (status = 200, description = "Semantic version of the running service", body = VersionPayload)
    )
)]
pub async fn version(State(state): State<Arc<AppState>>) -> Json<Version> {
    Json(state.versions.get_version())
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "admin",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus)
    )
)]
pub async fn healthz() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
    })
}

async fn not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("no route for {}", uri.path()))
}

/// Bind `host:port` from the config and serve until Ctrl-C.
pub async fn serve(config: &ServiceConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_config(config)?);
    let addr = config.bind_addr();

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(
        "{} v{} listening on http://{}",
        state.identity.name,
        state.versions.get_version(),
        listener.local_addr().context("Failed to read local address")?
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
