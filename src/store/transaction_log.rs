//! Transaction log repository (transfer idempotency records)
//!
//! `create_pending` relies on the unique index on `idempotency_key`: when two
//! requests race, exactly one insert succeeds and the loser sees
//! [`StoreError::UniqueViolation`]. `mark_completed` runs inside the money
//! scope so log state and balances commit atomically; `mark_failed` runs on
//! the pool because the failed scope's writes are already gone.

use sqlx::{PgPool, Row};
use sqlx::postgres::PgRow;
use std::str::FromStr;
use uuid::Uuid;

use super::{Scope, StoreError};
use crate::models::{TransactionLog, TransactionLogState};

pub struct TransactionLogRepo;

impl TransactionLogRepo {
    /// Fetch a log by idempotency key
    pub async fn get_by_key(
        pool: &PgPool,
        idempotency_key: &str,
    ) -> Result<Option<TransactionLog>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, idempotency_key, state, from_wallet_id, to_wallet_id, amount_cents,
                   error_message, response_payload, response_status_code, created_at, updated_at
            FROM transaction_logs_tb
            WHERE idempotency_key = $1
            "#,
        )
        .bind(idempotency_key)
        .fetch_optional(pool)
        .await?;

        match row {
            Some(row) => Ok(Some(row_to_log(&row)?)),
            None => Ok(None),
        }
    }

    /// Insert a new PENDING log for the key.
    ///
    /// A concurrent request holding the same key makes this fail with
    /// [`StoreError::UniqueViolation`]; the caller re-reads and either
    /// replays or reports the in-flight conflict.
    pub async fn create_pending(
        pool: &PgPool,
        idempotency_key: &str,
        amount_cents: i64,
    ) -> Result<Uuid, StoreError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO transaction_logs_tb (idempotency_key, state, amount_cents)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(idempotency_key)
        .bind(TransactionLogState::Pending.as_str())
        .bind(amount_cents)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    /// Mark COMPLETED inside the money-movement scope
    #[allow(clippy::too_many_arguments)]
    pub async fn mark_completed(
        tx: &mut Scope<'_>,
        log_id: Uuid,
        from_wallet_id: Uuid,
        to_wallet_id: Uuid,
        response_payload: &serde_json::Value,
        response_status_code: i32,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE transaction_logs_tb
            SET state = $1, from_wallet_id = $2, to_wallet_id = $3,
                response_payload = $4, response_status_code = $5, updated_at = NOW()
            WHERE id = $6
            "#,
        )
        .bind(TransactionLogState::Completed.as_str())
        .bind(from_wallet_id)
        .bind(to_wallet_id)
        .bind(response_payload)
        .bind(response_status_code)
        .bind(log_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Mark FAILED after a scope rolled back (compensating write, pool-level)
    pub async fn mark_failed(
        pool: &PgPool,
        log_id: Uuid,
        error_message: &str,
        response_payload: &serde_json::Value,
        response_status_code: i32,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE transaction_logs_tb
            SET state = $1, error_message = $2, response_payload = $3,
                response_status_code = $4, updated_at = NOW()
            WHERE id = $5
            "#,
        )
        .bind(TransactionLogState::Failed.as_str())
        .bind(error_message)
        .bind(response_payload)
        .bind(response_status_code)
        .bind(log_id)
        .execute(pool)
        .await?;

        Ok(())
    }
}

fn row_to_log(row: &PgRow) -> Result<TransactionLog, StoreError> {
    let state_str: String = row.get("state");
    let state = TransactionLogState::from_str(&state_str).map_err(StoreError::CorruptRow)?;

    Ok(TransactionLog {
        id: row.get("id"),
        idempotency_key: row.get("idempotency_key"),
        state,
        from_wallet_id: row.get("from_wallet_id"),
        to_wallet_id: row.get("to_wallet_id"),
        amount_cents: row.get("amount_cents"),
        error_message: row.get("error_message"),
        response_payload: row.get("response_payload"),
        response_status_code: row.get("response_status_code"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
