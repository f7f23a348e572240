//! Transactional Store Layer
//!
//! Everything the money-moving services need from PostgreSQL, behind one
//! explicitly constructed [`Database`] handle (no global connection state;
//! the binary owns the lifecycle and threads `&Database` into each service).
//!
//! The contract the services rely on:
//! - a transactional scope at REPEATABLE READ ([`Database::begin_repeatable_read`]);
//! - exclusive row locks via `SELECT ... FOR UPDATE` inside a scope;
//! - inserts that surface uniqueness races as [`StoreError::UniqueViolation`]
//!   instead of an opaque database error;
//! - atomic find-or-create for interest records (`INSERT ... ON CONFLICT`).

pub mod interest;
pub mod ledger;
pub mod schema;
pub mod transaction_log;
pub mod users;
pub mod wallets;

use sqlx::postgres::{PgPool, PgPoolOptions, Postgres};
use sqlx::Transaction;
use std::time::Duration;
use thiserror::Error;

pub use interest::InterestRecordRepo;
pub use ledger::LedgerRepo;
pub use transaction_log::TransactionLogRepo;
pub use users::UserRepo;
pub use wallets::WalletRepo;

/// A transaction scope against the store
pub type Scope<'a> = Transaction<'a, Postgres>;

/// Store-level errors
///
/// Uniqueness races are a control-flow signal for the idempotency and
/// interest-record paths, so they get their own variant; everything else is
/// infrastructure failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated")]
    UniqueViolation,

    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error("corrupt row: {0}")]
    CorruptRow(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                return StoreError::UniqueViolation;
            }
        }
        StoreError::Database(e)
    }
}

/// PostgreSQL database handle
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new connection pool
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        tracing::info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    /// Wrap an existing pool (tests)
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Open a transactional scope at REPEATABLE READ isolation.
    ///
    /// All wallet mutations run inside such a scope: the balance read, the
    /// balance write, and the ledger append commit or roll back as one unit.
    pub async fn begin_repeatable_read(&self) -> Result<Scope<'static>, StoreError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    /// Create tables and indexes if they do not exist
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        schema::init(&self.pool).await
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
