//! Domain Row Types
//!
//! Persisted rows and their state/classification enums. String codes are
//! what lands in the database columns; `as_str`/`parse` round-trip them.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Account owner. One wallet per user.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Wallet row. Balance is integer minor units (cents) and is only ever
/// mutated inside a transaction that also appends the paired ledger entry.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Wallet {
    pub id: Uuid,
    pub wallet_number: String,
    pub user_id: Uuid,
    pub balance_cents: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ledger entry classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerEntryType {
    /// External/administrative funding credit
    Credit,
    /// Credit side of a peer transfer
    TransferIn,
    /// Debit side of a peer transfer
    TransferOut,
    /// Daily interest accrual credit
    Interest,
}

impl LedgerEntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerEntryType::Credit => "CREDIT",
            LedgerEntryType::TransferIn => "TRANSFER_IN",
            LedgerEntryType::TransferOut => "TRANSFER_OUT",
            LedgerEntryType::Interest => "INTEREST",
        }
    }
}

impl fmt::Display for LedgerEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LedgerEntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREDIT" => Ok(LedgerEntryType::Credit),
            "TRANSFER_IN" => Ok(LedgerEntryType::TransferIn),
            "TRANSFER_OUT" => Ok(LedgerEntryType::TransferOut),
            "INTEREST" => Ok(LedgerEntryType::Interest),
            other => Err(format!("Unknown ledger entry type: {}", other)),
        }
    }
}

/// Immutable ledger entry: one balance-affecting event. Positive amount is a
/// credit, negative a debit. Never updated or deleted after insert.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub wallet_id: Uuid,
    pub amount_cents: i64,
    pub entry_type: LedgerEntryType,
    pub reference_id: Option<String>,
    pub reference_type: Option<String>,
    /// Wallet balance after this entry was applied
    pub balance_after_cents: i64,
    pub created_at: DateTime<Utc>,
}

/// Interest accrual record: at most one per (wallet, calendar date),
/// enforced by a database uniqueness constraint.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct InterestRecord {
    pub id: Uuid,
    pub wallet_id: Uuid,
    pub interest_date: NaiveDate,
    pub balance_cents_at_eod: i64,
    pub interest_cents: i64,
    /// Daily rate applied, rounded to 6 dp for audit
    #[schema(value_type = String)]
    pub rate_used: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Transaction-log state machine
///
/// `PENDING -> {COMPLETED, FAILED}`; terminal states replay their stored
/// response verbatim and never transition again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionLogState {
    Pending,
    Completed,
    Failed,
}

impl TransactionLogState {
    /// Terminal states never transition again
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionLogState::Completed | TransactionLogState::Failed
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionLogState::Pending => "PENDING",
            TransactionLogState::Completed => "COMPLETED",
            TransactionLogState::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TransactionLogState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionLogState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(TransactionLogState::Pending),
            "COMPLETED" => Ok(TransactionLogState::Completed),
            "FAILED" => Ok(TransactionLogState::Failed),
            other => Err(format!("Unknown transaction log state: {}", other)),
        }
    }
}

/// Idempotency record for a transfer request, keyed by the caller-supplied
/// idempotency key (globally unique). Stores the eventual status code and
/// response payload so replays return identical results.
#[derive(Debug, Clone)]
pub struct TransactionLog {
    pub id: Uuid,
    pub idempotency_key: String,
    pub state: TransactionLogState,
    pub from_wallet_id: Option<Uuid>,
    pub to_wallet_id: Option<Uuid>,
    pub amount_cents: Option<i64>,
    pub error_message: Option<String>,
    pub response_payload: Option<serde_json::Value>,
    pub response_status_code: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(TransactionLogState::Completed.is_terminal());
        assert!(TransactionLogState::Failed.is_terminal());
        assert!(!TransactionLogState::Pending.is_terminal());
    }

    #[test]
    fn test_state_str_roundtrip() {
        for state in [
            TransactionLogState::Pending,
            TransactionLogState::Completed,
            TransactionLogState::Failed,
        ] {
            let recovered: TransactionLogState = state.as_str().parse().unwrap();
            assert_eq!(state, recovered);
        }
    }

    #[test]
    fn test_invalid_state_str() {
        assert!("RUNNING".parse::<TransactionLogState>().is_err());
        assert!("".parse::<TransactionLogState>().is_err());
    }

    #[test]
    fn test_entry_type_roundtrip() {
        for t in [
            LedgerEntryType::Credit,
            LedgerEntryType::TransferIn,
            LedgerEntryType::TransferOut,
            LedgerEntryType::Interest,
        ] {
            let recovered: LedgerEntryType = t.as_str().parse().unwrap();
            assert_eq!(t, recovered);
        }
        assert!("DEBIT".parse::<LedgerEntryType>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(TransactionLogState::Pending.to_string(), "PENDING");
        assert_eq!(LedgerEntryType::TransferOut.to_string(), "TRANSFER_OUT");
    }
}
