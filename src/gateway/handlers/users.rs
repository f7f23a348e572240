//! User provisioning handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use super::super::state::AppState;
use super::super::types::{ApiError, CreateUserRequest, reply};
use crate::service::ProvisioningService;
use crate::store::UserRepo;

/// POST /api/users
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User and wallet created"),
        (status = 400, description = "Invalid username"),
        (status = 409, description = "Username already taken")
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Response, ApiError> {
    let result = ProvisioningService::create_user(&state.db, &req.username).await?;
    Ok(reply(result.status_code, &result.body))
}

/// GET /api/users/{id}
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User found"),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    match UserRepo::get_by_id(state.db.pool(), id).await? {
        Some(user) => Ok(Json(user).into_response()),
        None => Ok(reply(
            404,
            &crate::service::ErrorBody::new(format!("User not found: {}", id)),
        )),
    }
}
