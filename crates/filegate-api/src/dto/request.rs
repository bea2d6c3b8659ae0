//! Request DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// POST /api/auth/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// POST /api/users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Desired username.
    pub username: String,
    /// Plaintext password.
    pub password: String,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Administrator flag.
    #[serde(default)]
    pub is_admin: bool,
    /// Initial role memberships.
    #[serde(default)]
    pub role_ids: Vec<Uuid>,
}

/// PUT /api/users/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    /// New email address.
    #[serde(default)]
    pub email: Option<String>,
    /// New active flag.
    #[serde(default)]
    pub is_active: Option<bool>,
    /// New admin flag.
    #[serde(default)]
    pub is_admin: Option<bool>,
    /// Replacement role set; `None` leaves memberships unchanged.
    #[serde(default)]
    pub role_ids: Option<Vec<Uuid>>,
}

/// POST /api/roles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoleRequest {
    /// Unique role name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Read bit.
    #[serde(default = "default_true")]
    pub can_read: bool,
    /// Write bit.
    #[serde(default)]
    pub can_write: bool,
    /// Copy bit.
    #[serde(default)]
    pub can_copy: bool,
    /// Delete bit.
    #[serde(default)]
    pub can_delete: bool,
    /// Share bit.
    #[serde(default)]
    pub can_share: bool,
}

/// PUT /api/roles/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New read bit.
    #[serde(default)]
    pub can_read: Option<bool>,
    /// New write bit.
    #[serde(default)]
    pub can_write: Option<bool>,
    /// New copy bit.
    #[serde(default)]
    pub can_copy: Option<bool>,
    /// New delete bit.
    #[serde(default)]
    pub can_delete: Option<bool>,
    /// New share bit.
    #[serde(default)]
    pub can_share: Option<bool>,
}

/// Query parameter for listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderQuery {
    /// Folder path; defaults to the root.
    #[serde(default = "default_folder")]
    pub folder_path: String,
}

/// POST /api/files/{id}/copy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyFileRequest {
    /// Destination folder path.
    #[serde(default = "default_folder")]
    pub destination_folder: String,
}

/// POST /api/files/bulk-delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    /// IDs of the files to delete.
    pub file_ids: Vec<Uuid>,
}

/// POST /api/files/create-folder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    /// Name of the new folder.
    pub folder_name: String,
    /// Parent folder path.
    #[serde(default = "default_folder")]
    pub parent_folder: String,
}

/// POST /api/files/{id}/share and /api/files/{id}/share-token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareFileRequest {
    /// Requested lifetime in hours; clamped server-side.
    #[serde(default = "default_share_hours")]
    pub expires_in_hours: i64,
}

/// POST /api/folder-assignments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignFolderRequest {
    /// Folder path (normalized server-side).
    pub folder_path: String,
    /// The user to grant.
    pub user_id: Uuid,
    /// Read bit.
    #[serde(default = "default_true")]
    pub can_read: bool,
    /// Write bit.
    #[serde(default)]
    pub can_write: bool,
    /// Delete bit.
    #[serde(default)]
    pub can_delete: bool,
}

/// POST /api/folder-assignments/bulk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkAssignRequest {
    /// Folder path (normalized server-side).
    pub folder_path: String,
    /// The users to grant.
    pub user_ids: Vec<Uuid>,
    /// Read bit.
    #[serde(default = "default_true")]
    pub can_read: bool,
    /// Write bit.
    #[serde(default)]
    pub can_write: bool,
    /// Delete bit.
    #[serde(default)]
    pub can_delete: bool,
}

fn default_true() -> bool {
    true
}

fn default_folder() -> String {
    "/".to_string()
}

fn default_share_hours() -> i64 {
    24
}
