//! Interest accrual handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::super::state::AppState;
use super::super::types::{AccrueInterestRequest, ApiError, InterestRecordsQuery, clamp_limit};
use crate::models::InterestRecord;
use crate::service::{AccrualInput, InterestService};
use crate::store::InterestRecordRepo;

#[derive(Debug, Serialize, ToSchema)]
pub struct InterestRecordsResponse {
    pub records: Vec<InterestRecord>,
}

/// POST /api/interest/accrue
#[utoipa::path(
    post,
    path = "/api/interest/accrue",
    request_body = AccrueInterestRequest,
    responses(
        (status = 200, description = "Interest accrued (or replayed); zero interest returns no record"),
        (status = 500, description = "Wallet missing or store failure")
    ),
    tag = "Interest"
)]
pub async fn accrue_interest(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AccrueInterestRequest>,
) -> Result<Response, ApiError> {
    let outcome = InterestService::accrue_daily(
        &state.db,
        AccrualInput {
            wallet_id: req.wallet_id,
            balance_cents_at_eod: req.balance_cents_at_eod,
            interest_date: req.interest_date,
        },
    )
    .await?;

    Ok(Json(outcome).into_response())
}

/// GET /api/interest/records
#[utoipa::path(
    get,
    path = "/api/interest/records",
    params(
        ("wallet_id" = Option<Uuid>, Query, description = "Filter by wallet"),
        ("limit" = Option<i64>, Query, description = "Max records, 1..=100, default 50")
    ),
    responses(
        (status = 200, description = "Recent interest records, newest date first", body = InterestRecordsResponse)
    ),
    tag = "Interest"
)]
pub async fn get_interest_records(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InterestRecordsQuery>,
) -> Result<Response, ApiError> {
    let limit = clamp_limit(query.limit);
    let records = InterestRecordRepo::recent(state.db.pool(), query.wallet_id, limit).await?;

    Ok(Json(InterestRecordsResponse { records }).into_response())
}
