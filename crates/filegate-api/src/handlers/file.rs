//! File handlers: listings, presigned uploads/downloads, copies,
//! deletes, folders, and shares.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use filegate_service::file::service::UploadUrlRequest;
use filegate_service::listing::{FolderEntry, ListingEntry};

use crate::dto::request::{
    BulkDeleteRequest, CopyFileRequest, CreateFolderRequest, FolderQuery, ShareFileRequest,
};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/files/upload-url
pub async fn upload_url(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UploadUrlRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let issued = state.file_service.issue_upload_url(&auth, req).await?;
    Ok(Json(serde_json::json!({
        "file_id": issued.file_id,
        "object_key": issued.object_key,
        "upload_url": issued.upload.url,
        "upload_method": issued.upload.method,
        "upload_headers": issued.upload.headers,
    })))
}

/// POST /api/files/{id}/complete-upload
pub async fn complete_upload(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(file_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let file = state.file_service.complete_upload(&auth, file_id).await?;
    Ok(Json(serde_json::json!({
        "message": "Upload completed",
        "file_size": file.size_bytes,
    })))
}

/// GET /api/files?folder_path=...
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<FolderQuery>,
) -> Result<Json<Vec<ListingEntry>>, ApiError> {
    let entries = state
        .listing_service
        .list_folder(&auth, &query.folder_path)
        .await?;
    Ok(Json(entries))
}

/// GET /api/files/folders?folder_path=...
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<FolderQuery>,
) -> Result<Json<Vec<FolderEntry>>, ApiError> {
    let folders = state
        .listing_service
        .list_folders(&auth, &query.folder_path)
        .await?;
    Ok(Json(folders))
}

/// GET /api/files/{id}/download-url
pub async fn download_url(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(file_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let download = state.file_service.download_url(&auth, file_id).await?;
    Ok(Json(serde_json::json!({
        "download_url": download.download_url,
        "filename": download.filename,
    })))
}

/// GET /api/files/download-by-key/{*key}
pub async fn download_url_by_key(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(object_key): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let download = state
        .file_service
        .download_url_by_key(&auth, &object_key)
        .await?;
    Ok(Json(serde_json::json!({
        "download_url": download.download_url,
        "filename": download.filename,
    })))
}

/// POST /api/files/{id}/copy
pub async fn copy_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(file_id): Path<Uuid>,
    Json(req): Json<CopyFileRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let copy = state
        .file_service
        .copy_file(&auth, file_id, &req.destination_folder)
        .await?;
    Ok(Json(serde_json::json!({
        "id": copy.id,
        "message": "File copied successfully",
    })))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(file_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.file_service.delete_file(&auth, file_id).await?;
    Ok(Json(MessageResponse::new("File deleted successfully")))
}

/// DELETE /api/files/by-key/{*key}
pub async fn delete_file_by_key(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(object_key): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .file_service
        .delete_file_by_key(&auth, &object_key)
        .await?;
    Ok(Json(MessageResponse::new("File deleted successfully")))
}

/// POST /api/files/bulk-delete
pub async fn bulk_delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<BulkDeleteRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = state.file_service.bulk_delete(&auth, &req.file_ids).await?;
    Ok(Json(serde_json::json!({
        "message": format!("Deleted {} files successfully", result.deleted_count),
        "outcomes": result.outcomes,
    })))
}

/// POST /api/files/create-folder
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let folder_path = state
        .file_service
        .create_folder(&auth, &req.folder_name, &req.parent_folder)
        .await?;
    Ok(Json(serde_json::json!({
        "message": "Folder created successfully",
        "folder_path": folder_path,
    })))
}

/// POST /api/files/{id}/share — direct presign, nothing persisted.
pub async fn share_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(file_id): Path<Uuid>,
    Json(req): Json<ShareFileRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let shared = state
        .share_service
        .create_share_url(&auth, file_id, req.expires_in_hours)
        .await?;
    Ok(Json(serde_json::json!({
        "share_url": shared.share_url,
        "expires_at": shared.expires_at,
        "expires_in_hours": shared.expires_in_hours,
    })))
}

/// POST /api/files/{id}/share-token — persisted token-backed link.
pub async fn share_token(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(file_id): Path<Uuid>,
    Json(req): Json<ShareFileRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let link = state
        .share_service
        .create_share_token(&auth, file_id, req.expires_in_hours)
        .await?;
    Ok(Json(serde_json::json!({
        "share_token": link.token,
        "expires_at": link.expires_at,
    })))
}

/// GET /api/files/share/{token} — public resolution, no principal.
pub async fn resolve_share_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let shared = state.share_service.resolve_share_token(&token).await?;
    Ok(Json(serde_json::json!({
        "filename": shared.filename,
        "file_size": shared.size_bytes,
        "content_type": shared.content_type,
        "download_url": shared.download_url,
    })))
}
