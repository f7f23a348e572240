//! Wallet repository
//!
//! Reads are plain pool queries; anything that precedes a balance mutation
//! goes through the `lock_*` methods, which take an open scope and hold a
//! `FOR UPDATE` row lock until that scope ends.

use sqlx::PgPool;
use uuid::Uuid;

use super::{Scope, StoreError};
use crate::models::Wallet;

pub struct WalletRepo;

impl WalletRepo {
    /// Fetch a wallet by id, no lock
    pub async fn get_by_id(pool: &PgPool, wallet_id: Uuid) -> Result<Option<Wallet>, StoreError> {
        let wallet = sqlx::query_as::<_, Wallet>(
            r#"SELECT id, wallet_number, user_id, balance_cents, currency, created_at, updated_at
               FROM wallets_tb WHERE id = $1"#,
        )
        .bind(wallet_id)
        .fetch_optional(pool)
        .await?;

        Ok(wallet)
    }

    /// Lock a wallet row by primary key for the remainder of the scope
    pub async fn lock_by_id(
        tx: &mut Scope<'_>,
        wallet_id: Uuid,
    ) -> Result<Option<Wallet>, StoreError> {
        let wallet = sqlx::query_as::<_, Wallet>(
            r#"SELECT id, wallet_number, user_id, balance_cents, currency, created_at, updated_at
               FROM wallets_tb WHERE id = $1
               FOR UPDATE"#,
        )
        .bind(wallet_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(wallet)
    }

    /// Lock a wallet row by owning user for the remainder of the scope
    pub async fn lock_by_user_id(
        tx: &mut Scope<'_>,
        user_id: Uuid,
    ) -> Result<Option<Wallet>, StoreError> {
        let wallet = sqlx::query_as::<_, Wallet>(
            r#"SELECT id, wallet_number, user_id, balance_cents, currency, created_at, updated_at
               FROM wallets_tb WHERE user_id = $1
               FOR UPDATE"#,
        )
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(wallet)
    }

    /// Create a wallet inside a scope (provisioning path)
    pub async fn create(
        tx: &mut Scope<'_>,
        user_id: Uuid,
        wallet_number: &str,
        currency: &str,
    ) -> Result<Wallet, StoreError> {
        let wallet = sqlx::query_as::<_, Wallet>(
            r#"
            INSERT INTO wallets_tb (user_id, wallet_number, balance_cents, currency)
            VALUES ($1, $2, 0, $3)
            RETURNING id, wallet_number, user_id, balance_cents, currency, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(wallet_number)
        .bind(currency)
        .fetch_one(&mut **tx)
        .await?;

        Ok(wallet)
    }

    /// Check whether a wallet number is taken (provisioning retry loop)
    pub async fn wallet_number_exists(
        tx: &mut Scope<'_>,
        wallet_number: &str,
    ) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM wallets_tb WHERE wallet_number = $1)",
        )
        .bind(wallet_number)
        .fetch_one(&mut **tx)
        .await?;

        Ok(exists)
    }
}
