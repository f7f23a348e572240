//! Service Reply Types
//!
//! Every operation returns a `{status_code, body}` reply whose body is a
//! closed union. The transfer body is also what gets persisted on the
//! transaction log and deserialized back on replay, so the schema is fixed:
//! a receipt or an `{error}` object, nothing open-ended.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::InterestRecord;

/// Error body shared by all non-success replies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

// ============================================================================
// Transfer
// ============================================================================

/// Successful transfer receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TransferReceipt {
    pub from_wallet_id: Uuid,
    pub to_wallet_id: Uuid,
    pub amount_cents: i64,
    pub from_balance_cents: i64,
    pub to_balance_cents: i64,
}

/// Transfer response body: the closed union persisted on the transaction log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum TransferBody {
    Receipt(TransferReceipt),
    Error(ErrorBody),
}

/// Transfer operation reply
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TransferReply {
    pub status_code: u16,
    pub body: TransferBody,
}

impl TransferReply {
    pub fn ok(receipt: TransferReceipt) -> Self {
        Self {
            status_code: 200,
            body: TransferBody::Receipt(receipt),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status_code: 400,
            body: TransferBody::Error(ErrorBody::new(msg)),
        }
    }

    pub fn payment_required(msg: impl Into<String>) -> Self {
        Self {
            status_code: 402,
            body: TransferBody::Error(ErrorBody::new(msg)),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status_code: 404,
            body: TransferBody::Error(ErrorBody::new(msg)),
        }
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self {
            status_code: 409,
            body: TransferBody::Error(ErrorBody::new(msg)),
        }
    }

    pub fn server_error(msg: impl Into<String>) -> Self {
        Self {
            status_code: 500,
            body: TransferBody::Error(ErrorBody::new(msg)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    /// Error text for the transaction log's error_message column
    pub fn error_message(&self) -> Option<&str> {
        match &self.body {
            TransferBody::Error(body) => Some(&body.error),
            TransferBody::Receipt(_) => None,
        }
    }
}

// ============================================================================
// Funding
// ============================================================================

/// Successful funding receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FundingReceipt {
    pub wallet_id: Uuid,
    pub balance_cents: i64,
    pub credited_cents: i64,
}

/// Funding response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum FundingBody {
    Receipt(FundingReceipt),
    Error(ErrorBody),
}

/// Funding operation reply
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FundingReply {
    pub status_code: u16,
    pub body: FundingBody,
}

impl FundingReply {
    pub fn ok(receipt: FundingReceipt) -> Self {
        Self {
            status_code: 200,
            body: FundingBody::Receipt(receipt),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status_code: 400,
            body: FundingBody::Error(ErrorBody::new(msg)),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status_code: 404,
            body: FundingBody::Error(ErrorBody::new(msg)),
        }
    }
}

// ============================================================================
// Interest accrual
// ============================================================================

/// Result of a daily accrual. `record` is absent when the computed interest
/// was zero and nothing was persisted.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccrualOutcome {
    pub interest_cents: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<InterestRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_body_replay_roundtrip() {
        // The persisted payload must deserialize back into the same variant
        let receipt = TransferReceipt {
            from_wallet_id: Uuid::nil(),
            to_wallet_id: Uuid::nil(),
            amount_cents: 4_000,
            from_balance_cents: 6_000,
            to_balance_cents: 4_000,
        };
        let body = TransferBody::Receipt(receipt);
        let value = serde_json::to_value(&body).unwrap();
        let replayed: TransferBody = serde_json::from_value(value).unwrap();
        assert_eq!(replayed, body);
    }

    #[test]
    fn test_error_body_replay_roundtrip() {
        let body = TransferBody::Error(ErrorBody::new("Insufficient balance"));
        let value = serde_json::to_value(&body).unwrap();
        let replayed: TransferBody = serde_json::from_value(value).unwrap();
        assert_eq!(replayed, body);
    }

    #[test]
    fn test_reply_constructors_carry_status() {
        assert_eq!(TransferReply::bad_request("x").status_code, 400);
        assert_eq!(TransferReply::payment_required("x").status_code, 402);
        assert_eq!(TransferReply::not_found("x").status_code, 404);
        assert_eq!(TransferReply::conflict("x").status_code, 409);
        assert_eq!(TransferReply::server_error("x").status_code, 500);
        assert!(!TransferReply::server_error("x").is_success());
    }

    #[test]
    fn test_error_message_extraction() {
        let reply = TransferReply::payment_required("Insufficient balance");
        assert_eq!(reply.error_message(), Some("Insufficient balance"));

        let receipt = TransferReceipt {
            from_wallet_id: Uuid::nil(),
            to_wallet_id: Uuid::nil(),
            amount_cents: 1,
            from_balance_cents: 0,
            to_balance_cents: 1,
        };
        assert_eq!(TransferReply::ok(receipt).error_message(), None);
    }
}
