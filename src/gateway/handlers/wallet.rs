//! Wallet handlers: lookup, ledger listing, funding

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::super::state::AppState;
use super::super::types::{ApiError, FundWalletRequest, LimitQuery, clamp_limit, reply};
use crate::models::LedgerEntry;
use crate::service::{ErrorBody, FundingService};
use crate::store::{LedgerRepo, WalletRepo};

#[derive(Debug, Serialize, ToSchema)]
pub struct WalletLedgerResponse {
    pub wallet_id: Uuid,
    pub entries: Vec<LedgerEntry>,
}

/// GET /api/wallets/{id}
#[utoipa::path(
    get,
    path = "/api/wallets/{id}",
    params(("id" = Uuid, Path, description = "Wallet id")),
    responses(
        (status = 200, description = "Wallet found"),
        (status = 404, description = "Wallet not found")
    ),
    tag = "Wallets"
)]
pub async fn get_wallet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    match WalletRepo::get_by_id(state.db.pool(), id).await? {
        Some(wallet) => Ok(Json(wallet).into_response()),
        None => Ok(reply(
            404,
            &ErrorBody::new(format!("Wallet not found: {}", id)),
        )),
    }
}

/// GET /api/wallets/{id}/ledger
#[utoipa::path(
    get,
    path = "/api/wallets/{id}/ledger",
    params(
        ("id" = Uuid, Path, description = "Wallet id"),
        ("limit" = Option<i64>, Query, description = "Max entries, 1..=100, default 50")
    ),
    responses(
        (status = 200, description = "Recent ledger entries, newest first", body = WalletLedgerResponse),
        (status = 404, description = "Wallet not found")
    ),
    tag = "Wallets"
)]
pub async fn get_wallet_ledger(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<LimitQuery>,
) -> Result<Response, ApiError> {
    if WalletRepo::get_by_id(state.db.pool(), id).await?.is_none() {
        return Ok(reply(
            404,
            &ErrorBody::new(format!("Wallet not found: {}", id)),
        ));
    }

    let limit = clamp_limit(query.limit);
    let entries = LedgerRepo::recent_for_wallet(state.db.pool(), id, limit).await?;

    Ok(Json(WalletLedgerResponse {
        wallet_id: id,
        entries,
    })
    .into_response())
}

/// POST /api/wallets/{id}/fund
#[utoipa::path(
    post,
    path = "/api/wallets/{id}/fund",
    params(("id" = Uuid, Path, description = "Wallet id")),
    request_body = FundWalletRequest,
    responses(
        (status = 200, description = "Wallet credited"),
        (status = 400, description = "Amount not a positive integer"),
        (status = 404, description = "Wallet not found")
    ),
    tag = "Wallets"
)]
pub async fn fund_wallet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<FundWalletRequest>,
) -> Result<Response, ApiError> {
    let result = FundingService::fund(&state.db, id, req.amount_cents).await?;
    Ok(reply(result.status_code, &result.body))
}
