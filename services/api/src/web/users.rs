//! services/api/src/web/users.rs
//!
//! Profile read and update.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::web::dto::{store_failure, AccountResponse, ApiFailure, UpdateUserRequest};
use crate::web::state::AppState;
use productr_core::domain::AccountUpdate;

const USER_NOT_FOUND: &str = "User not found";

/// Fetch a profile by id.
#[utoipa::path(
    get,
    path = "/api/user/{id}",
    params(("id" = Uuid, Path, description = "Account id")),
    responses(
        (status = 200, description = "The account", body = AccountResponse),
        (status = 404, description = "No such user", body = crate::web::dto::ErrorBody),
        (status = 500, description = "Store failure", body = crate::web::dto::ErrorBody)
    ),
    tag = "user"
)]
pub async fn get_user_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountResponse>, ApiFailure> {
    let account = state
        .store
        .get_account(id)
        .await
        .map_err(|e| store_failure(e, USER_NOT_FOUND))?;
    Ok(Json(account.into()))
}

/// Replace the mutable profile fields that are present in the body.
#[utoipa::path(
    put,
    path = "/api/user/{id}",
    params(("id" = Uuid, Path, description = "Account id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated account", body = AccountResponse),
        (status = 404, description = "No such user", body = crate::web::dto::ErrorBody),
        (status = 500, description = "Store failure", body = crate::web::dto::ErrorBody)
    ),
    tag = "user"
)]
pub async fn update_user_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<AccountResponse>, ApiFailure> {
    let update = AccountUpdate {
        full_name: req.full_name,
        email: req.email,
        phone: req.phone,
        bio: req.bio,
        profile_pic: req.profile_pic,
    };
    let account = state.store.update_account(id, update).await.map_err(|e| {
        error!("PUT /api/user/{} failed: {}", id, e);
        store_failure(e, USER_NOT_FOUND)
    })?;
    info!(
        "Profile updated for user: {} ({})",
        account.full_name, account.email
    );

    Ok(Json(account.into()))
}
