//! Role administration handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use filegate_entity::user::{CreateRole, Role, UpdateRole};

use crate::dto::request::{CreateRoleRequest, UpdateRoleRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{AdminUser, AuthUser};
use crate::state::AppState;

/// POST /api/roles
pub async fn create_role(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<CreateRoleRequest>,
) -> Result<Json<Role>, ApiError> {
    let role = state
        .role_service
        .create_role(
            &admin,
            CreateRole {
                name: req.name,
                description: req.description,
                can_read: req.can_read,
                can_write: req.can_write,
                can_copy: req.can_copy,
                can_delete: req.can_delete,
                can_share: req.can_share,
            },
        )
        .await?;
    Ok(Json(role))
}

/// GET /api/roles — any authenticated user; role names drive the UI.
pub async fn list_roles(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Role>>, ApiError> {
    Ok(Json(state.role_service.list_roles().await?))
}

/// PUT /api/roles/{id}
pub async fn update_role(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(role_id): Path<Uuid>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<Json<Role>, ApiError> {
    let role = state
        .role_service
        .update_role(
            &admin,
            role_id,
            UpdateRole {
                description: req.description,
                can_read: req.can_read,
                can_write: req.can_write,
                can_copy: req.can_copy,
                can_delete: req.can_delete,
                can_share: req.can_share,
            },
        )
        .await?;
    Ok(Json(role))
}

/// DELETE /api/roles/{id}
pub async fn delete_role(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(role_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.role_service.delete_role(&admin, role_id).await?;
    Ok(Json(MessageResponse::new("Role deleted successfully")))
}
