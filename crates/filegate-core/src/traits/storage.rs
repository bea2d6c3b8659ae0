//! Object-store gateway trait.
//!
//! The gateway never proxies bytes: reads and writes happen directly
//! between the client and the bucket through presigned URLs. The trait is
//! defined here in `filegate-core` and implemented in `filegate-storage`.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::result::AppResult;

/// One entry of a prefix/delimiter listing.
///
/// A delimiter listing yields two kinds of entries: concrete objects and
/// common prefixes (one level of pseudo-folder). The enum makes the two
/// mutually exclusive — an entry is never both.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ObjectEntry {
    /// A stored object.
    Object {
        /// Full key of the object.
        key: String,
        /// Size in bytes, when the store reports one.
        size: Option<i64>,
        /// Last-modified timestamp, when the store reports one.
        last_modified: Option<DateTime<Utc>>,
    },
    /// A group of keys sharing a prefix up to the next delimiter.
    CommonPrefix {
        /// The shared prefix, including the trailing delimiter.
        prefix: String,
    },
}

/// A presigned upload target returned to the client.
///
/// The upload is an HTTP PUT against `url`; every header listed in
/// `headers` is part of the signature and must be sent verbatim, which is
/// what pins the content type server-side.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PresignedUpload {
    /// The signed URL.
    pub url: String,
    /// HTTP method to use (always `PUT` for the S3 implementation).
    pub method: String,
    /// Headers that participate in the signature.
    pub headers: BTreeMap<String, String>,
}

/// Per-key result of a batched delete.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DeleteOutcome {
    /// The key the outcome refers to.
    pub key: String,
    /// Whether the store acknowledged the deletion.
    pub deleted: bool,
    /// Store-reported error message for failed keys.
    pub error: Option<String>,
}

/// Trait for S3-compatible object-store backends.
///
/// All operations fail closed: transport and credential errors are mapped
/// to `AppError` at this boundary and never leak raw SDK types to callers.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "s3", "memory").
    fn provider_type(&self) -> &str;

    /// List objects under a prefix.
    ///
    /// With a delimiter, the result mixes [`ObjectEntry::Object`] entries
    /// (keys directly under the prefix) and [`ObjectEntry::CommonPrefix`]
    /// entries (one level of sub-folder). Without one, every key under the
    /// prefix is returned recursively.
    async fn list_objects(
        &self,
        prefix: &str,
        delimiter: Option<&str>,
    ) -> AppResult<Vec<ObjectEntry>>;

    /// Presign an upload for a key with a pinned content type.
    async fn presign_upload(&self, key: &str, content_type: &str) -> AppResult<PresignedUpload>;

    /// Presign a download URL for a key with the given lifetime.
    async fn presign_download(&self, key: &str, expires_in: Duration) -> AppResult<String>;

    /// Copy an object within the bucket.
    async fn copy(&self, src_key: &str, dst_key: &str) -> AppResult<()>;

    /// Delete a single object.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Delete a batch of objects, reporting a per-key outcome.
    async fn delete_many(&self, keys: &[String]) -> AppResult<Vec<DeleteOutcome>>;

    /// Create a zero-byte marker object so an empty prefix lists as a folder.
    async fn put_folder_marker(&self, key: &str) -> AppResult<()>;
}
