use std::sync::Arc;

use crate::store::Database;

/// Gateway application state (shared)
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL database handle, owned by the process entry point
    pub db: Arc<Database>,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}
