//! Derived listing rows. Never persisted — produced fresh per request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of a folder view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ListingEntry {
    /// A sub-folder.
    Folder(FolderEntry),
    /// A file.
    File(FileEntry),
}

/// A sub-folder row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderEntry {
    /// Display name — the path segment, which may literally be `/`.
    pub name: String,
    /// Navigable folder path.
    pub path: String,
}

/// A file row, sourced from the store, the metadata table, or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Metadata row ID; `None` for store-only (external) objects.
    pub id: Option<Uuid>,
    /// Display filename.
    pub filename: String,
    /// Object-store key.
    pub object_key: String,
    /// Size in bytes, preferring the live store value when present.
    pub size_bytes: Option<i64>,
    /// MIME type; `None` for external objects.
    pub content_type: Option<String>,
    /// The folder the entry was listed under.
    pub folder_path: String,
    /// Upload time, or store last-modified for external objects.
    pub uploaded_at: Option<DateTime<Utc>>,
    /// Owner username; `"External"` for store-only objects, `"Unknown"`
    /// when the owning user no longer exists.
    pub owner: String,
}
