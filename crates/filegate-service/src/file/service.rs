//! File lifecycle: presigned uploads, completion, downloads, copies,
//! deletes, and folder markers.
//!
//! Mutations never span the two stores transactionally. Writes presign
//! or copy in the bucket first and only then touch metadata; deletes
//! remove bytes first and rows second, so a failure leaves an orphaned
//! row (tolerated by the reconciler) rather than orphaned bytes.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use filegate_auth::capability;
use filegate_core::config::storage::ObjectStorageConfig;
use filegate_core::error::AppError;
use filegate_core::traits::storage::{DeleteOutcome, ObjectEntry, ObjectStore, PresignedUpload};
use filegate_core::types::Capability;
use filegate_core::types::path::file_object_key;
use filegate_database::repositories::file::FileRepository;
use filegate_entity::file::{CreateFileRecord, FileRecord};
use filegate_entity::user::Principal;

/// Request to issue an upload URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadUrlRequest {
    /// Filename as it should appear in listings.
    pub filename: String,
    /// MIME type, pinned into the presigned request.
    pub content_type: String,
    /// Destination folder.
    #[serde(default = "default_folder")]
    pub folder_path: String,
    /// Declared object size, when the client knows it up front.
    #[serde(default)]
    pub size_bytes: Option<i64>,
}

fn default_folder() -> String {
    "/".to_string()
}

/// An issued upload: the pending metadata row plus the presigned target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedUpload {
    /// ID of the pending file record.
    pub file_id: Uuid,
    /// The object key the upload will land at.
    pub object_key: String,
    /// Where and how to send the bytes.
    pub upload: PresignedUpload,
}

/// A presigned download.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadUrl {
    /// The signed URL.
    pub download_url: String,
    /// Filename for the client to save under.
    pub filename: String,
}

/// Result of a bulk delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteResult {
    /// Number of metadata rows removed.
    pub deleted_count: u64,
    /// Per-key store outcomes.
    pub outcomes: Vec<DeleteOutcome>,
}

/// Orchestrates the object store and the metadata table for file
/// mutations.
#[derive(Debug, Clone)]
pub struct FileService {
    file_repo: Arc<FileRepository>,
    store: Arc<dyn ObjectStore>,
    max_upload_size_bytes: u64,
    download_url_ttl: Duration,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        store: Arc<dyn ObjectStore>,
        config: &ObjectStorageConfig,
    ) -> Self {
        Self {
            file_repo,
            store,
            max_upload_size_bytes: config.max_upload_size_bytes,
            download_url_ttl: Duration::from_secs(config.download_url_ttl_seconds),
        }
    }

    /// Issue a presigned upload URL and create the pending metadata row.
    ///
    /// The row is created after the presign succeeds, so a storage
    /// failure never leaves metadata pointing at a key that was never
    /// issued.
    pub async fn issue_upload_url(
        &self,
        principal: &Principal,
        req: UploadUrlRequest,
    ) -> Result<IssuedUpload, AppError> {
        capability::require(principal, Capability::Write, None)?;

        if req.filename.trim().is_empty() {
            return Err(AppError::validation("Filename cannot be empty"));
        }
        if let Some(size) = req.size_bytes {
            if size < 0 || size as u64 > self.max_upload_size_bytes {
                return Err(AppError::validation(format!(
                    "Declared size exceeds the {} byte upload limit",
                    self.max_upload_size_bytes
                )));
            }
        }

        let object_key = file_object_key(&req.folder_path, &req.filename);
        let upload = self
            .store
            .presign_upload(&object_key, &req.content_type)
            .await?;

        let record = self
            .file_repo
            .create(&CreateFileRecord {
                filename: req.filename,
                object_key: object_key.clone(),
                size_bytes: None,
                content_type: Some(req.content_type),
                folder_path: req.folder_path,
                owner_id: Some(principal.user_id()),
            })
            .await?;

        info!(
            user_id = %principal.user_id(),
            file_id = %record.id,
            key = %object_key,
            "Upload URL issued"
        );

        Ok(IssuedUpload {
            file_id: record.id,
            object_key,
            upload,
        })
    }

    /// Record the uploaded size by re-listing the store for the key.
    ///
    /// The upload URL itself was the write grant, so completion carries
    /// no capability check. If the bytes have not landed yet the size
    /// simply stays unset.
    pub async fn complete_upload(
        &self,
        _principal: &Principal,
        file_id: Uuid,
    ) -> Result<FileRecord, AppError> {
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        let objects = match self.store.list_objects(&file.object_key, None).await {
            Ok(objects) => objects,
            Err(e) => {
                tracing::warn!(
                    file_id = %file_id,
                    error = %e,
                    "Store listing failed during upload completion"
                );
                Vec::new()
            }
        };

        let size = objects.iter().find_map(|entry| match entry {
            ObjectEntry::Object { key, size, .. } if *key == file.object_key => *size,
            _ => None,
        });

        match size {
            Some(size) => {
                let updated = self.file_repo.set_size(file_id, size).await?;
                info!(file_id = %file_id, size_bytes = size, "Upload completed");
                Ok(updated)
            }
            None => Ok(file),
        }
    }

    /// Presign a download for a known file.
    pub async fn download_url(
        &self,
        principal: &Principal,
        file_id: Uuid,
    ) -> Result<DownloadUrl, AppError> {
        capability::require(principal, Capability::Read, None)?;

        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        let download_url = self
            .store
            .presign_download(&file.object_key, self.download_url_ttl)
            .await?;

        Ok(DownloadUrl {
            download_url,
            filename: file.filename,
        })
    }

    /// Presign a download for a raw key — external objects have no row.
    pub async fn download_url_by_key(
        &self,
        principal: &Principal,
        object_key: &str,
    ) -> Result<DownloadUrl, AppError> {
        capability::require(principal, Capability::Read, None)?;

        let download_url = self
            .store
            .presign_download(object_key, self.download_url_ttl)
            .await?;

        let filename = object_key
            .rsplit('/')
            .next()
            .unwrap_or(object_key)
            .to_string();

        Ok(DownloadUrl {
            download_url,
            filename,
        })
    }

    /// Copy a file into another folder. The store copy runs first; the
    /// new row is owned by the caller.
    pub async fn copy_file(
        &self,
        principal: &Principal,
        file_id: Uuid,
        destination_folder: &str,
    ) -> Result<FileRecord, AppError> {
        capability::require(principal, Capability::Copy, None)?;

        let original = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        let new_key = file_object_key(destination_folder, &original.filename);
        self.store.copy(&original.object_key, &new_key).await?;

        let copy = self
            .file_repo
            .create(&CreateFileRecord {
                filename: original.filename.clone(),
                object_key: new_key,
                size_bytes: original.size_bytes,
                content_type: original.content_type.clone(),
                folder_path: destination_folder.to_string(),
                owner_id: Some(principal.user_id()),
            })
            .await?;

        info!(
            user_id = %principal.user_id(),
            src = %original.object_key,
            dst = %copy.object_key,
            "File copied"
        );

        Ok(copy)
    }

    /// Delete a file: bytes first, then the row (share links cascade).
    pub async fn delete_file(
        &self,
        principal: &Principal,
        file_id: Uuid,
    ) -> Result<(), AppError> {
        capability::require(principal, Capability::Delete, None)?;

        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        self.store.delete(&file.object_key).await?;
        self.file_repo.delete(file_id).await?;

        info!(
            user_id = %principal.user_id(),
            file_id = %file_id,
            key = %file.object_key,
            "File deleted"
        );
        Ok(())
    }

    /// Delete by raw key; a missing metadata row is not an error.
    pub async fn delete_file_by_key(
        &self,
        principal: &Principal,
        object_key: &str,
    ) -> Result<(), AppError> {
        capability::require(principal, Capability::Delete, None)?;

        self.store.delete(object_key).await?;
        self.file_repo.delete_by_object_key(object_key).await?;

        info!(
            user_id = %principal.user_id(),
            key = %object_key,
            "File deleted by key"
        );
        Ok(())
    }

    /// Delete a batch of files by ID, reporting per-key store outcomes.
    pub async fn bulk_delete(
        &self,
        principal: &Principal,
        file_ids: &[Uuid],
    ) -> Result<BulkDeleteResult, AppError> {
        capability::require(principal, Capability::Delete, None)?;

        let files = self.file_repo.find_by_ids(file_ids).await?;
        if files.is_empty() {
            return Err(AppError::not_found("No files found"));
        }

        let keys: Vec<String> = files.iter().map(|f| f.object_key.clone()).collect();
        let outcomes = self.store.delete_many(&keys).await?;

        let ids: Vec<Uuid> = files.iter().map(|f| f.id).collect();
        let deleted_count = self.file_repo.delete_by_ids(&ids).await?;

        info!(
            user_id = %principal.user_id(),
            requested = file_ids.len(),
            deleted = deleted_count,
            "Bulk delete"
        );

        Ok(BulkDeleteResult {
            deleted_count,
            outcomes,
        })
    }

    /// Create a folder by writing a `.keep` marker under it.
    pub async fn create_folder(
        &self,
        principal: &Principal,
        folder_name: &str,
        parent_folder: &str,
    ) -> Result<String, AppError> {
        capability::require(principal, Capability::Write, None)?;

        let name = folder_name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }
        if name.contains('/') {
            return Err(AppError::validation("Folder name cannot contain '/'"));
        }

        let parent = parent_folder.trim_matches('/');
        let folder_key = if parent.is_empty() {
            name.to_string()
        } else {
            format!("{parent}/{name}")
        };
        self.store
            .put_folder_marker(&format!("{folder_key}/.keep"))
            .await?;

        info!(
            user_id = %principal.user_id(),
            folder = %folder_key,
            "Folder created"
        );

        Ok(format!("/{folder_key}"))
    }
}
