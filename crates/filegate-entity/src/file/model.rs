//! File metadata entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Metadata for a known upload.
///
/// The object store is the source of truth for bytes; this row is the
/// source of truth for ownership and placement. The two drift: a key may
/// exist in the bucket with no row (externally added) and a row may point
/// at a key whose bytes are gone (externally deleted). Both are tolerated
/// by the listing reconciler, never treated as corruption.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// Display filename.
    pub filename: String,
    /// Object-store key; unique across all records.
    pub object_key: String,
    /// Size in bytes. `None` while the upload is pending.
    pub size_bytes: Option<i64>,
    /// MIME type declared at upload time.
    pub content_type: Option<String>,
    /// UI folder path the file lives in.
    pub folder_path: String,
    /// Owning user; nullable so external ownership churn cannot orphan rows.
    pub owner_id: Option<Uuid>,
    /// When the upload URL was issued.
    pub uploaded_at: DateTime<Utc>,
}

impl FileRecord {
    /// Whether the upload has been completed (size recorded).
    pub fn is_complete(&self) -> bool {
        self.size_bytes.is_some()
    }
}

/// A file row joined with its owner's username for display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileWithOwner {
    /// The file record.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub file: FileRecord,
    /// Username of the owner; `None` when the owning user is gone.
    pub owner_username: Option<String>,
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFileRecord {
    /// Display filename.
    pub filename: String,
    /// Object-store key.
    pub object_key: String,
    /// Size in bytes, when already known (e.g. copies).
    pub size_bytes: Option<i64>,
    /// MIME type.
    pub content_type: Option<String>,
    /// UI folder path.
    pub folder_path: String,
    /// Owning user.
    pub owner_id: Option<Uuid>,
}
