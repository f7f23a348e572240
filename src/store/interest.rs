//! Interest record repository
//!
//! The (wallet_id, interest_date) uniqueness constraint is the real defense
//! against double accrual; `find_or_create` leans on it with
//! `INSERT ... ON CONFLICT DO NOTHING` so two concurrent accruals for the
//! same day converge on one row without a dedicated lock.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Scope, StoreError};
use crate::models::InterestRecord;

pub struct InterestRecordRepo;

impl InterestRecordRepo {
    /// Unlocked lookup for the idempotent fast path
    pub async fn get(
        pool: &PgPool,
        wallet_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<InterestRecord>, StoreError> {
        let record = sqlx::query_as::<_, InterestRecord>(
            r#"
            SELECT id, wallet_id, interest_date, balance_cents_at_eod, interest_cents,
                   rate_used, created_at
            FROM interest_records_tb
            WHERE wallet_id = $1 AND interest_date = $2
            "#,
        )
        .bind(wallet_id)
        .bind(date)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Atomic insert-if-absent-else-return-existing.
    ///
    /// Returns `(record, created)`; `created == false` means a concurrent
    /// accrual (or an earlier run) already wrote the row.
    pub async fn find_or_create(
        tx: &mut Scope<'_>,
        wallet_id: Uuid,
        date: NaiveDate,
        balance_cents_at_eod: i64,
        interest_cents: i64,
        rate_used: Decimal,
    ) -> Result<(InterestRecord, bool), StoreError> {
        let inserted = sqlx::query_as::<_, InterestRecord>(
            r#"
            INSERT INTO interest_records_tb
                (wallet_id, interest_date, balance_cents_at_eod, interest_cents, rate_used)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (wallet_id, interest_date) DO NOTHING
            RETURNING id, wallet_id, interest_date, balance_cents_at_eod, interest_cents,
                      rate_used, created_at
            "#,
        )
        .bind(wallet_id)
        .bind(date)
        .bind(balance_cents_at_eod)
        .bind(interest_cents)
        .bind(rate_used)
        .fetch_optional(&mut **tx)
        .await?;

        if let Some(record) = inserted {
            return Ok((record, true));
        }

        // Lost the race: the row exists, fetch it inside the same scope
        let existing = sqlx::query_as::<_, InterestRecord>(
            r#"
            SELECT id, wallet_id, interest_date, balance_cents_at_eod, interest_cents,
                   rate_used, created_at
            FROM interest_records_tb
            WHERE wallet_id = $1 AND interest_date = $2
            "#,
        )
        .bind(wallet_id)
        .bind(date)
        .fetch_one(&mut **tx)
        .await?;

        Ok((existing, false))
    }

    /// Refresh an existing record whose snapshot no longer matches
    pub async fn update_amounts(
        tx: &mut Scope<'_>,
        record_id: Uuid,
        balance_cents_at_eod: i64,
        interest_cents: i64,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE interest_records_tb
            SET balance_cents_at_eod = $1, interest_cents = $2, updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(balance_cents_at_eod)
        .bind(interest_cents)
        .bind(record_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Recent records, optionally filtered by wallet, newest date first
    pub async fn recent(
        pool: &PgPool,
        wallet_id: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<InterestRecord>, StoreError> {
        let records = match wallet_id {
            Some(wallet_id) => {
                sqlx::query_as::<_, InterestRecord>(
                    r#"
                    SELECT id, wallet_id, interest_date, balance_cents_at_eod, interest_cents,
                           rate_used, created_at
                    FROM interest_records_tb
                    WHERE wallet_id = $1
                    ORDER BY interest_date DESC
                    LIMIT $2
                    "#,
                )
                .bind(wallet_id)
                .bind(limit)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, InterestRecord>(
                    r#"
                    SELECT id, wallet_id, interest_date, balance_cents_at_eod, interest_cents,
                           rate_used, created_at
                    FROM interest_records_tb
                    ORDER BY interest_date DESC
                    LIMIT $1
                    "#,
                )
                .bind(limit)
                .fetch_all(pool)
                .await?
            }
        };

        Ok(records)
    }
}
