//! Health check handler

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Serialize;
use utoipa::ToSchema;

use super::super::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub git_hash: &'static str,
    pub database: &'static str,
}

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable")
    ),
    tag = "Health"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let database = match state.db.health_check().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            "down"
        }
    };

    let status = if database == "up" { "ok" } else { "degraded" };
    let code = if database == "up" {
        axum::http::StatusCode::OK
    } else {
        axum::http::StatusCode::SERVICE_UNAVAILABLE
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            git_hash: env!("GIT_HASH"),
            database,
        }),
    )
}
