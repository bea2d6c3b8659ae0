//! Folder assignment handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use filegate_entity::assignment::{AssignmentFlags, AssignmentWithUser, FolderAssignment};
use filegate_service::assignment::service::{BulkAssignmentResult, MyFolders};

use crate::dto::request::{AssignFolderRequest, BulkAssignRequest, FolderQuery};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{AdminUser, AuthUser};
use crate::state::AppState;

/// POST /api/folder-assignments
pub async fn assign_folder(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<AssignFolderRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let outcome = state
        .assignment_service
        .assign(
            &admin,
            &req.folder_path,
            req.user_id,
            AssignmentFlags {
                can_read: req.can_read,
                can_write: req.can_write,
                can_delete: req.can_delete,
            },
        )
        .await?;

    Ok(Json(serde_json::json!({
        "id": outcome.assignment.id,
        "folder_path": outcome.assignment.folder_path,
        "user_id": outcome.assignment.user_id,
        "username": outcome.username,
        "message": if outcome.created {
            "Folder assigned successfully"
        } else {
            "Folder assignment updated"
        },
    })))
}

/// POST /api/folder-assignments/bulk
pub async fn bulk_assign_folder(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<BulkAssignRequest>,
) -> Result<Json<BulkAssignmentResult>, ApiError> {
    let result = state
        .assignment_service
        .bulk_assign(
            &admin,
            &req.folder_path,
            &req.user_ids,
            AssignmentFlags {
                can_read: req.can_read,
                can_write: req.can_write,
                can_delete: req.can_delete,
            },
        )
        .await?;
    Ok(Json(result))
}

/// GET /api/folder-assignments
pub async fn list_all_assignments(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<AssignmentWithUser>>, ApiError> {
    Ok(Json(state.assignment_service.list_all().await?))
}

/// GET /api/folder-assignments/folder/{*path}
pub async fn list_folder_assignments(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(folder_path): Path<String>,
) -> Result<Json<Vec<AssignmentWithUser>>, ApiError> {
    Ok(Json(
        state.assignment_service.list_for_folder(&folder_path).await?,
    ))
}

/// GET /api/folder-assignments/user/{id}
pub async fn list_user_assignments(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<FolderAssignment>>, ApiError> {
    Ok(Json(state.assignment_service.list_for_user(user_id).await?))
}

/// GET /api/folder-assignments/my-folders
pub async fn my_folders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MyFolders>, ApiError> {
    Ok(Json(state.assignment_service.my_folders(&auth).await?))
}

/// DELETE /api/folder-assignments/{id}
pub async fn remove_assignment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(assignment_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.assignment_service.remove(assignment_id).await?;
    Ok(Json(MessageResponse::new("Assignment removed successfully")))
}

/// DELETE /api/folder-assignments/user/{id}?folder_path=...
///
/// A route wildcard cannot sit mid-path, so the folder arrives as a
/// query parameter.
pub async fn remove_user_from_folder(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<Uuid>,
    Query(query): Query<FolderQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .assignment_service
        .remove_by_folder_and_user(&query.folder_path, user_id)
        .await?;
    Ok(Json(MessageResponse::new(
        "User removed from folder successfully",
    )))
}
