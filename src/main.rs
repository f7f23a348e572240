//! walletd service entry point
//!
//! Owns the lifecycle: config, logging, database handle, schema bootstrap,
//! gateway. The services themselves receive the database by reference and
//! hold no global state.

use std::sync::Arc;

use walletd::config::AppConfig;
use walletd::gateway::{self, state::AppState};
use walletd::logging::init_logging;
use walletd::store::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::var("WALLETD_ENV").unwrap_or_else(|_| "default".to_string());
    let config = AppConfig::load(&env)?;
    let _guard = init_logging(&config);

    tracing::info!(env = %env, version = env!("CARGO_PKG_VERSION"), git_hash = env!("GIT_HASH"), "Starting walletd");

    let db = Database::connect(&config.database_url()?).await?;
    db.init_schema().await?;
    let db = Arc::new(db);

    let state = Arc::new(AppState::new(db));
    gateway::serve(state, &config.gateway.host, config.gateway.port).await?;

    Ok(())
}
