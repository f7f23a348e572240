//! Funding Operation
//!
//! Credits a wallet by a positive amount: lock the wallet, post one CREDIT
//! ledger entry, commit. Administrative operation: carries no idempotency
//! key, so a caller retry after a timeout can double-credit (accepted,
//! documented in DESIGN.md).

use chrono::Utc;
use uuid::Uuid;

use super::error::WalletError;
use super::types::{FundingReceipt, FundingReply};
use crate::models::LedgerEntryType;
use crate::store::ledger::EntryReference;
use crate::store::{Database, LedgerRepo, WalletRepo};

pub struct FundingService;

impl FundingService {
    /// Fund a wallet with a positive cent amount
    pub async fn fund(
        db: &Database,
        wallet_id: Uuid,
        amount_cents: i64,
    ) -> Result<FundingReply, WalletError> {
        if amount_cents <= 0 {
            return Ok(FundingReply::bad_request("amount_cents must be positive"));
        }

        let mut tx = db.begin_repeatable_read().await?;

        let Some(wallet) = WalletRepo::lock_by_id(&mut tx, wallet_id).await? else {
            return Ok(FundingReply::not_found(format!(
                "Wallet not found: {}",
                wallet_id
            )));
        };

        let reference = EntryReference::funding(wallet.id, Utc::now().timestamp_millis());
        let entry = LedgerRepo::post_entry(
            &mut tx,
            &wallet,
            amount_cents,
            LedgerEntryType::Credit,
            &reference,
        )
        .await?;

        tx.commit().await.map_err(crate::store::StoreError::from)?;

        tracing::info!(
            wallet_id = %wallet.id,
            credited_cents = amount_cents,
            balance_cents = entry.balance_after_cents,
            "Wallet funded"
        );

        Ok(FundingReply::ok(FundingReceipt {
            wallet_id: wallet.id,
            balance_cents: entry.balance_after_cents,
            credited_cents: amount_cents,
        }))
    }
}
