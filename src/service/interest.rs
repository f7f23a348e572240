//! Interest Accrual Operation
//!
//! One day of interest per wallet, idempotent on (wallet, date). The
//! uniqueness constraint on `interest_records_tb` is the primary defense
//! against double accrual; the stable `interest-{date}-{wallet}` ledger
//! reference is the audit trail's secondary correlation.

use chrono::NaiveDate;
use uuid::Uuid;

use super::error::WalletError;
use super::types::AccrualOutcome;
use crate::interest_math::{daily_interest_cents, persisted_rate};
use crate::models::LedgerEntryType;
use crate::store::ledger::EntryReference;
use crate::store::{Database, InterestRecordRepo, LedgerRepo, WalletRepo};

/// Accrual input: the end-of-day balance snapshot is supplied by the caller
/// (the batch scheduler that closed the books for `interest_date`).
#[derive(Debug, Clone)]
pub struct AccrualInput {
    pub wallet_id: Uuid,
    pub balance_cents_at_eod: i64,
    pub interest_date: NaiveDate,
}

pub struct InterestService;

impl InterestService {
    /// Accrue one day of interest for a wallet.
    ///
    /// A missing wallet is a fatal error, not a reply: accrual runs over the
    /// provisioned wallet set, so absence means upstream data corruption.
    pub async fn accrue_daily(
        db: &Database,
        input: AccrualInput,
    ) -> Result<AccrualOutcome, WalletError> {
        let AccrualInput {
            wallet_id,
            balance_cents_at_eod,
            interest_date,
        } = input;

        let interest_cents = daily_interest_cents(balance_cents_at_eod, interest_date);
        if interest_cents <= 0 {
            // Nothing to accrue; keep the ledger free of no-op entries
            return Ok(AccrualOutcome {
                interest_cents: 0,
                record: None,
            });
        }

        // Idempotent fast path: no lock, no scope
        if let Some(existing) = InterestRecordRepo::get(db.pool(), wallet_id, interest_date).await?
        {
            return Ok(AccrualOutcome {
                interest_cents: existing.interest_cents,
                record: Some(existing),
            });
        }

        let mut tx = db.begin_repeatable_read().await?;

        let Some(wallet) = WalletRepo::lock_by_id(&mut tx, wallet_id).await? else {
            return Err(WalletError::WalletNotFound(wallet_id));
        };

        let rate = persisted_rate(interest_date);
        let (mut record, created) = InterestRecordRepo::find_or_create(
            &mut tx,
            wallet_id,
            interest_date,
            balance_cents_at_eod,
            interest_cents,
            rate,
        )
        .await?;

        if !created {
            // Lost the race with a concurrent accrual: the winner already
            // moved the money. Reconcile the record if the snapshot changed,
            // but do not post a second ledger entry.
            if record.interest_cents != interest_cents
                || record.balance_cents_at_eod != balance_cents_at_eod
            {
                InterestRecordRepo::update_amounts(
                    &mut tx,
                    record.id,
                    balance_cents_at_eod,
                    interest_cents,
                )
                .await?;
                record.balance_cents_at_eod = balance_cents_at_eod;
                record.interest_cents = interest_cents;
            }
            tx.commit().await.map_err(crate::store::StoreError::from)?;

            return Ok(AccrualOutcome {
                interest_cents,
                record: Some(record),
            });
        }

        let reference = EntryReference::interest(wallet_id, interest_date);
        let entry = LedgerRepo::post_entry(
            &mut tx,
            &wallet,
            interest_cents,
            LedgerEntryType::Interest,
            &reference,
        )
        .await?;

        tx.commit().await.map_err(crate::store::StoreError::from)?;

        tracing::info!(
            wallet_id = %wallet_id,
            interest_date = %interest_date,
            interest_cents,
            balance_cents = entry.balance_after_cents,
            "Daily interest accrued"
        );

        Ok(AccrualOutcome {
            interest_cents,
            record: Some(record),
        })
    }
}
