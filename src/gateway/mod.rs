//! HTTP Gateway
//!
//! The collaborator surface around the core services: request parsing,
//! primitive validation, response serialization, Swagger UI. Core services
//! never see HTTP types.

pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use openapi::ApiDoc;
use state::AppState;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/users", post(handlers::users::create_user))
        .route("/api/users/{id}", get(handlers::users::get_user))
        .route("/api/wallets/{id}", get(handlers::wallet::get_wallet))
        .route(
            "/api/wallets/{id}/ledger",
            get(handlers::wallet::get_wallet_ledger),
        )
        .route(
            "/api/wallets/{id}/fund",
            post(handlers::wallet::fund_wallet),
        )
        .route("/api/transfer", post(handlers::transfer::post_transfer))
        .route(
            "/api/interest/accrue",
            post(handlers::interest::accrue_interest),
        )
        .route(
            "/api/interest/records",
            get(handlers::interest::get_interest_records),
        )
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

/// Bind and serve until the process exits
pub async fn serve(state: Arc<AppState>, host: &str, port: u16) -> std::io::Result<()> {
    let app = router(state);
    let listener = TcpListener::bind((host, port)).await?;
    tracing::info!("Gateway listening on http://{}:{}", host, port);
    tracing::info!("Swagger UI at http://{}:{}/docs", host, port);

    axum::serve(listener, app.into_make_service()).await
}
