//! Service Error Types
//!
//! Business outcomes (insufficient funds, not-found on transfers, key
//! conflicts) travel as reply values, not errors; see
//! [`crate::service::types`]. `WalletError` is what remains: faults the
//! caller cannot fix by changing the request.

use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

/// Fatal service errors
#[derive(Debug, Error)]
pub enum WalletError {
    /// Wallet missing where its existence is an upstream guarantee
    /// (interest accrual over a provisioned wallet set)
    #[error("Wallet not found: {0}")]
    WalletNotFound(Uuid),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Payload serialization failed: {0}")]
    Payload(#[from] serde_json::Error),
}

impl WalletError {
    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            WalletError::WalletNotFound(_) => "WALLET_NOT_FOUND",
            WalletError::Store(_) => "STORE_ERROR",
            WalletError::Payload(_) => "PAYLOAD_ERROR",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            WalletError::WalletNotFound(_) => 500,
            WalletError::Store(_) | WalletError::Payload(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            WalletError::WalletNotFound(Uuid::nil()).code(),
            "WALLET_NOT_FOUND"
        );
        assert_eq!(
            WalletError::Store(StoreError::UniqueViolation).code(),
            "STORE_ERROR"
        );
    }

    #[test]
    fn test_http_status_is_server_side() {
        // Everything here is a fault, not a client mistake
        assert_eq!(WalletError::WalletNotFound(Uuid::nil()).http_status(), 500);
        assert_eq!(
            WalletError::Store(StoreError::UniqueViolation).http_status(),
            500
        );
    }
}
