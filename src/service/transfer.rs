//! Transfer Operation
//!
//! Idempotent two-wallet balance move guarded by the transaction log:
//!
//! ```text
//! no-record -> PENDING -> {COMPLETED, FAILED}
//! ```
//!
//! Terminal logs replay their stored status and payload verbatim, so a
//! retried request observes exactly the original response and moves money
//! exactly once. The at-most-one-PENDING-per-key invariant comes from the
//! store's unique index, not in-process locking, so it holds across processes.

use uuid::Uuid;

use super::error::WalletError;
use super::types::{TransferBody, TransferReceipt, TransferReply};
use crate::models::{LedgerEntryType, TransactionLog};
use crate::store::ledger::EntryReference;
use crate::store::{Database, LedgerRepo, StoreError, TransactionLogRepo, WalletRepo};

/// Validated-primitive transfer input
#[derive(Debug, Clone)]
pub struct TransferInput {
    pub idempotency_key: String,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub amount_cents: i64,
}

/// Business exit of the money-movement scope. `Err` on the scope itself is
/// reserved for infrastructure faults.
enum ScopeOutcome {
    Completed(TransferReceipt),
    WalletMissing(Uuid),
    InsufficientBalance,
}

pub struct TransferService;

impl TransferService {
    /// Execute (or replay) a transfer for the given idempotency key
    pub async fn execute(
        db: &Database,
        input: TransferInput,
    ) -> Result<TransferReply, WalletError> {
        // Validation happens before any persistent state: violations never
        // create a transaction log row.
        if let Some(reply) = validate(&input) {
            return Ok(reply);
        }

        // Step 1: existing log? Terminal replays, PENDING conflicts.
        if let Some(log) = TransactionLogRepo::get_by_key(db.pool(), &input.idempotency_key).await?
        {
            return Ok(reply_for_existing(&log)?);
        }

        // Step 2: claim the key. The unique index arbitrates races: the
        // loser re-reads and either replays or reports the in-flight key.
        let log_id = match TransactionLogRepo::create_pending(
            db.pool(),
            &input.idempotency_key,
            input.amount_cents,
        )
        .await
        {
            Ok(id) => id,
            Err(StoreError::UniqueViolation) => {
                let log = TransactionLogRepo::get_by_key(db.pool(), &input.idempotency_key)
                    .await?
                    .ok_or_else(|| {
                        StoreError::CorruptRow(format!(
                            "Transaction log vanished for key {}",
                            input.idempotency_key
                        ))
                    })?;
                return Ok(reply_for_existing(&log)?);
            }
            Err(e) => return Err(e.into()),
        };

        // Step 3: move the money. Business outcomes come back as values;
        // infrastructure faults surface as Err and take the FAILED path too.
        let reply = match run_scope(db, log_id, &input).await {
            Ok(ScopeOutcome::Completed(receipt)) => TransferReply::ok(receipt),
            Ok(ScopeOutcome::WalletMissing(user_id)) => {
                TransferReply::not_found(format!("Wallet not found for user: {}", user_id))
            }
            Ok(ScopeOutcome::InsufficientBalance) => {
                TransferReply::payment_required("Insufficient balance")
            }
            Err(e) => {
                tracing::error!(
                    idempotency_key = %input.idempotency_key,
                    error = %e,
                    "Transfer scope failed"
                );
                TransferReply::server_error(e.to_string())
            }
        };

        // Step 4: the failed scope rolled its own writes back, so the FAILED
        // state is written separately, after the fact.
        if !reply.is_success() {
            let error_message = reply.error_message().unwrap_or("Transfer failed").to_string();
            let payload = serde_json::to_value(&reply.body)?;
            TransactionLogRepo::mark_failed(
                db.pool(),
                log_id,
                &error_message,
                &payload,
                reply.status_code as i32,
            )
            .await?;
        }

        Ok(reply)
    }
}

/// Pre-state validation. Returns the client-error reply for bad input.
fn validate(input: &TransferInput) -> Option<TransferReply> {
    if input.amount_cents <= 0 {
        return Some(TransferReply::bad_request("amount_cents must be positive"));
    }
    if input.from_user_id == input.to_user_id {
        return Some(TransferReply::bad_request(
            "from and to cannot be the same",
        ));
    }
    None
}

/// Replay a terminal log verbatim, or report the in-flight conflict
fn reply_for_existing(log: &TransactionLog) -> Result<TransferReply, WalletError> {
    if log.state.is_terminal() {
        let status_code = log.response_status_code.unwrap_or(200) as u16;
        let body = match &log.response_payload {
            Some(payload) => serde_json::from_value::<TransferBody>(payload.clone())?,
            None => TransferBody::Error(super::types::ErrorBody::new("Unknown")),
        };
        return Ok(TransferReply { status_code, body });
    }

    // PENDING: another request with this key is in flight
    Ok(TransferReply::conflict(
        "Request with this idempotency key is in progress",
    ))
}

/// The transactional money movement. Locks source then destination (source
/// checked first: the fixed acquisition order shared by all transfers),
/// debits, credits, and marks the log COMPLETED inside the same scope.
async fn run_scope(
    db: &Database,
    log_id: Uuid,
    input: &TransferInput,
) -> Result<ScopeOutcome, WalletError> {
    let mut tx = db.begin_repeatable_read().await?;

    let Some(from_wallet) = WalletRepo::lock_by_user_id(&mut tx, input.from_user_id).await? else {
        return Ok(ScopeOutcome::WalletMissing(input.from_user_id));
    };
    let Some(to_wallet) = WalletRepo::lock_by_user_id(&mut tx, input.to_user_id).await? else {
        return Ok(ScopeOutcome::WalletMissing(input.to_user_id));
    };

    if from_wallet.balance_cents < input.amount_cents {
        return Ok(ScopeOutcome::InsufficientBalance);
    }

    let reference = EntryReference::transfer(&input.idempotency_key);
    let debit = LedgerRepo::post_entry(
        &mut tx,
        &from_wallet,
        -input.amount_cents,
        LedgerEntryType::TransferOut,
        &reference,
    )
    .await?;
    let credit = LedgerRepo::post_entry(
        &mut tx,
        &to_wallet,
        input.amount_cents,
        LedgerEntryType::TransferIn,
        &reference,
    )
    .await?;

    let receipt = TransferReceipt {
        from_wallet_id: from_wallet.id,
        to_wallet_id: to_wallet.id,
        amount_cents: input.amount_cents,
        from_balance_cents: debit.balance_after_cents,
        to_balance_cents: credit.balance_after_cents,
    };

    // Log state and balance changes commit atomically together
    let payload = serde_json::to_value(TransferBody::Receipt(receipt.clone()))?;
    TransactionLogRepo::mark_completed(
        &mut tx,
        log_id,
        from_wallet.id,
        to_wallet.id,
        &payload,
        200,
    )
    .await?;

    tx.commit().await.map_err(StoreError::from)?;

    tracing::info!(
        idempotency_key = %input.idempotency_key,
        from_wallet = %receipt.from_wallet_id,
        to_wallet = %receipt.to_wallet_id,
        amount_cents = receipt.amount_cents,
        "Transfer completed"
    );

    Ok(ScopeOutcome::Completed(receipt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionLogState;
    use chrono::Utc;

    fn input(key: &str, amount: i64) -> TransferInput {
        TransferInput {
            idempotency_key: key.to_string(),
            from_user_id: Uuid::from_u128(1),
            to_user_id: Uuid::from_u128(2),
            amount_cents: amount,
        }
    }

    fn log(state: TransactionLogState) -> TransactionLog {
        TransactionLog {
            id: Uuid::from_u128(10),
            idempotency_key: "k1".to_string(),
            state,
            from_wallet_id: None,
            to_wallet_id: None,
            amount_cents: Some(100),
            error_message: None,
            response_payload: None,
            response_status_code: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_rejects_non_positive_amount() {
        let reply = validate(&input("k1", 0)).unwrap();
        assert_eq!(reply.status_code, 400);
        let reply = validate(&input("k1", -5)).unwrap();
        assert_eq!(reply.status_code, 400);
    }

    #[test]
    fn test_validate_rejects_self_transfer() {
        let mut i = input("k1", 100);
        i.to_user_id = i.from_user_id;
        let reply = validate(&i).unwrap();
        assert_eq!(reply.status_code, 400);
    }

    #[test]
    fn test_validate_accepts_good_input() {
        assert!(validate(&input("k1", 100)).is_none());
    }

    #[test]
    fn test_pending_log_yields_conflict() {
        let reply = reply_for_existing(&log(TransactionLogState::Pending)).unwrap();
        assert_eq!(reply.status_code, 409);
    }

    #[test]
    fn test_completed_log_replays_stored_response() {
        let receipt = TransferReceipt {
            from_wallet_id: Uuid::from_u128(3),
            to_wallet_id: Uuid::from_u128(4),
            amount_cents: 4_000,
            from_balance_cents: 6_000,
            to_balance_cents: 4_000,
        };
        let mut l = log(TransactionLogState::Completed);
        l.response_status_code = Some(200);
        l.response_payload =
            Some(serde_json::to_value(TransferBody::Receipt(receipt.clone())).unwrap());

        let reply = reply_for_existing(&l).unwrap();
        assert_eq!(reply.status_code, 200);
        assert_eq!(reply.body, TransferBody::Receipt(receipt));
    }

    #[test]
    fn test_failed_log_replays_stored_error() {
        let mut l = log(TransactionLogState::Failed);
        l.response_status_code = Some(402);
        l.response_payload = Some(
            serde_json::to_value(TransferBody::Error(super::super::types::ErrorBody::new(
                "Insufficient balance",
            )))
            .unwrap(),
        );

        let reply = reply_for_existing(&l).unwrap();
        assert_eq!(reply.status_code, 402);
        assert_eq!(reply.error_message(), Some("Insufficient balance"));
    }

    #[test]
    fn test_terminal_log_without_payload_replays_unknown() {
        let mut l = log(TransactionLogState::Completed);
        l.response_status_code = None;
        l.response_payload = None;

        let reply = reply_for_existing(&l).unwrap();
        assert_eq!(reply.status_code, 200);
        assert_eq!(reply.error_message(), Some("Unknown"));
    }
}
