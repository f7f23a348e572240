//! Ledger repository and the shared balance-mutation primitive
//!
//! [`LedgerRepo::post_entry`] is the only code path that changes a wallet
//! balance: one wallet update plus one ledger insert, both inside the
//! caller's scope, so they commit or roll back together. The caller must
//! already hold the wallet's row lock and must have validated sufficiency
//! before posting a negative delta; the primitive trusts that check.

use sqlx::{PgPool, Row};
use sqlx::postgres::PgRow;
use std::str::FromStr;
use uuid::Uuid;

use super::{Scope, StoreError};
use crate::models::{LedgerEntry, LedgerEntryType, Wallet};

/// Correlation reference carried by a ledger entry
#[derive(Debug, Clone)]
pub struct EntryReference {
    pub reference_id: String,
    pub reference_type: &'static str,
}

impl EntryReference {
    pub fn funding(wallet_id: Uuid, timestamp_millis: i64) -> Self {
        Self {
            reference_id: format!("fund-{}-{}", wallet_id, timestamp_millis),
            reference_type: "FUND",
        }
    }

    /// Both legs of one transfer carry the same reference id
    pub fn transfer(idempotency_key: &str) -> Self {
        Self {
            reference_id: format!("transfer-{}", idempotency_key),
            reference_type: "TRANSFER",
        }
    }

    /// Stable per (wallet, date): re-running an accrual reuses the same id
    pub fn interest(wallet_id: Uuid, date: chrono::NaiveDate) -> Self {
        Self {
            reference_id: format!("interest-{}-{}", date, wallet_id),
            reference_type: "INTEREST",
        }
    }
}

pub struct LedgerRepo;

impl LedgerRepo {
    /// Apply a signed cent delta to a locked wallet and append the ledger row.
    ///
    /// Returns the entry carrying the resulting balance. Exactly one wallet
    /// update and one ledger insert per call.
    pub async fn post_entry(
        tx: &mut Scope<'_>,
        wallet: &Wallet,
        delta_cents: i64,
        entry_type: LedgerEntryType,
        reference: &EntryReference,
    ) -> Result<LedgerEntry, StoreError> {
        let new_balance = wallet.balance_cents + delta_cents;

        sqlx::query(
            "UPDATE wallets_tb SET balance_cents = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(new_balance)
        .bind(wallet.id)
        .execute(&mut **tx)
        .await?;

        let row = sqlx::query(
            r#"
            INSERT INTO ledger_tb
                (wallet_id, amount_cents, entry_type, reference_id, reference_type, balance_after_cents)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, wallet_id, amount_cents, entry_type, reference_id, reference_type,
                      balance_after_cents, created_at
            "#,
        )
        .bind(wallet.id)
        .bind(delta_cents)
        .bind(entry_type.as_str())
        .bind(&reference.reference_id)
        .bind(reference.reference_type)
        .bind(new_balance)
        .fetch_one(&mut **tx)
        .await?;

        row_to_entry(&row)
    }

    /// Recent entries for a wallet, newest first
    pub async fn recent_for_wallet(
        pool: &PgPool,
        wallet_id: Uuid,
        limit: i64,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, wallet_id, amount_cents, entry_type, reference_id, reference_type,
                   balance_after_cents, created_at
            FROM ledger_tb
            WHERE wallet_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(wallet_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        rows.iter().map(row_to_entry).collect()
    }
}

fn row_to_entry(row: &PgRow) -> Result<LedgerEntry, StoreError> {
    let type_str: String = row.get("entry_type");
    let entry_type = LedgerEntryType::from_str(&type_str).map_err(StoreError::CorruptRow)?;

    Ok(LedgerEntry {
        id: row.get("id"),
        wallet_id: row.get("wallet_id"),
        amount_cents: row.get("amount_cents"),
        entry_type,
        reference_id: row.get("reference_id"),
        reference_type: row.get("reference_type"),
        balance_after_cents: row.get("balance_after_cents"),
        created_at: row.get("created_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_reference_is_key_derived() {
        let r = EntryReference::transfer("k1");
        assert_eq!(r.reference_id, "transfer-k1");
        assert_eq!(r.reference_type, "TRANSFER");
    }

    #[test]
    fn test_interest_reference_is_stable_per_wallet_and_date() {
        let wallet_id = Uuid::nil();
        let date = chrono::NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
        let a = EntryReference::interest(wallet_id, date);
        let b = EntryReference::interest(wallet_id, date);
        assert_eq!(a.reference_id, b.reference_id);
        assert_eq!(
            a.reference_id,
            format!("interest-2023-06-15-{}", wallet_id)
        );
    }
}
