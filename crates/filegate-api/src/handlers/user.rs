//! User administration handlers (admin-only).

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use filegate_entity::user::UpdateUser;
use filegate_service::user::service::UserWithRoles;

use crate::dto::request::{CreateUserRequest, UpdateUserRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::AdminUser;
use crate::state::AppState;

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<UserWithRoles>, ApiError> {
    let user = state
        .user_service
        .create_user(
            &admin,
            &req.username,
            &req.password,
            req.email,
            req.is_admin,
            &req.role_ids,
        )
        .await?;
    Ok(Json(user))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<UserWithRoles>>, ApiError> {
    Ok(Json(state.user_service.list_users().await?))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(user_id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserWithRoles>, ApiError> {
    let update = UpdateUser {
        email: req.email,
        is_active: req.is_active,
        is_admin: req.is_admin,
    };
    let user = state
        .user_service
        .update_user(&admin, user_id, update, req.role_ids)
        .await?;
    Ok(Json(user))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.user_service.delete_user(&admin, user_id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
