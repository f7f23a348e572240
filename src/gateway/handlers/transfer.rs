//! Transfer handler

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;

use super::super::state::AppState;
use super::super::types::{ApiError, TransferRequest, reply};
use crate::service::{ErrorBody, TransferInput, TransferService};

/// POST /api/transfer
///
/// The idempotency key comes from the `Idempotency-Key` header, falling back
/// to the request body; without one the request is rejected before any state
/// is touched.
#[utoipa::path(
    post,
    path = "/api/transfer",
    request_body = TransferRequest,
    params(
        ("Idempotency-Key" = Option<String>, Header, description = "Caller-supplied idempotency key")
    ),
    responses(
        (status = 200, description = "Transfer completed (or replayed)"),
        (status = 400, description = "Invalid amount, same user, or missing idempotency key"),
        (status = 402, description = "Insufficient balance"),
        (status = 404, description = "Wallet not found for a user"),
        (status = 409, description = "Same idempotency key currently in flight")
    ),
    tag = "Transfers"
)]
pub async fn post_transfer(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<TransferRequest>,
) -> Result<Response, ApiError> {
    let header_key = headers
        .get("idempotency-key")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let body_key = req
        .idempotency_key
        .as_deref()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let Some(idempotency_key) = header_key.or(body_key) else {
        return Ok(reply(
            400,
            &ErrorBody::new("Idempotency-Key header or idempotency_key field required"),
        ));
    };

    let result = TransferService::execute(
        &state.db,
        TransferInput {
            idempotency_key,
            from_user_id: req.from_user_id,
            to_user_id: req.to_user_id,
            amount_cents: req.amount_cents,
        },
    )
    .await?;

    Ok(reply(result.status_code, &result.body))
}
