//! Gateway request DTOs and the fatal-error response type
//!
//! The services already produce `{status_code, body}` replies for every
//! business outcome, so handlers mostly pass those through. [`ApiError`]
//! covers what is left: infrastructure faults that bubble up as
//! [`WalletError`].

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::service::{ErrorBody, WalletError};

/// Fatal errors crossing the HTTP boundary
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl From<WalletError> for ApiError {
    fn from(e: WalletError) -> Self {
        tracing::error!(code = e.code(), error = %e, "Service error");
        Self {
            status: StatusCode::from_u16(e.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message: e.to_string(),
        }
    }
}

impl From<crate::store::StoreError> for ApiError {
    fn from(e: crate::store::StoreError) -> Self {
        ApiError::from(WalletError::Store(e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

/// Serialize a service `{status_code, body}` reply into an HTTP response
pub fn reply(status_code: u16, body: &impl serde::Serialize) -> Response {
    let status =
        StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(serde_json::to_value(body).unwrap_or(serde_json::Value::Null)),
    )
        .into_response()
}

// ============================================================================
// Request DTOs
// ============================================================================

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FundWalletRequest {
    pub amount_cents: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferRequest {
    /// Falls back to the `Idempotency-Key` header when absent
    pub idempotency_key: Option<String>,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub amount_cents: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AccrueInterestRequest {
    pub wallet_id: Uuid,
    pub balance_cents_at_eod: i64,
    /// Calendar date, `YYYY-MM-DD`
    pub interest_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct InterestRecordsQuery {
    pub wallet_id: Option<Uuid>,
    pub limit: Option<i64>,
}

/// Clamp a caller-supplied page size to 1..=100, defaulting to 50
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(50).clamp(1, 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), 50);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-3)), 1);
        assert_eq!(clamp_limit(Some(70)), 70);
        assert_eq!(clamp_limit(Some(1_000)), 100);
    }
}
