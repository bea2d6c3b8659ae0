//! Listing service: fetches both sides of the reconciliation.

use std::sync::Arc;

use tracing::warn;

use filegate_auth::capability;
use filegate_core::error::AppError;
use filegate_core::traits::storage::ObjectStore;
use filegate_core::types::Capability;
use filegate_core::types::path::folder_prefix;
use filegate_database::repositories::file::FileRepository;
use filegate_entity::user::Principal;

use super::entry::{FolderEntry, ListingEntry};
use super::reconciler;

/// Produces folder views by merging the object store with the metadata
/// table. Nothing is cached — every call lists fresh.
#[derive(Debug, Clone)]
pub struct ListingService {
    file_repo: Arc<FileRepository>,
    store: Arc<dyn ObjectStore>,
}

impl ListingService {
    /// Creates a new listing service.
    pub fn new(file_repo: Arc<FileRepository>, store: Arc<dyn ObjectStore>) -> Self {
        Self { file_repo, store }
    }

    /// The full single-level view of a folder: sub-folders then files.
    pub async fn list_folder(
        &self,
        principal: &Principal,
        folder_path: &str,
    ) -> Result<Vec<ListingEntry>, AppError> {
        capability::require(principal, Capability::Read, None)?;

        let db_files = self.file_repo.find_by_folder_path_with_owner(folder_path).await?;

        let prefix = folder_prefix(folder_path);
        let objects = match self.store.list_objects(&prefix, Some("/")).await {
            Ok(objects) => objects,
            Err(e) => {
                // A dead bucket must not hide files we know about; fall
                // back to the metadata-only view.
                warn!(
                    folder = %folder_path,
                    error = %e,
                    "Object-store listing failed; serving metadata-only view"
                );
                Vec::new()
            }
        };

        Ok(reconciler::reconcile(folder_path, &db_files, &objects))
    }

    /// The folders-only view, derived from a recursive key scan.
    pub async fn list_folders(
        &self,
        principal: &Principal,
        folder_path: &str,
    ) -> Result<Vec<FolderEntry>, AppError> {
        capability::require(principal, Capability::Read, None)?;

        let prefix = folder_prefix(folder_path);
        let objects = match self.store.list_objects(&prefix, None).await {
            Ok(objects) => objects,
            Err(e) => {
                warn!(
                    folder = %folder_path,
                    error = %e,
                    "Object-store listing failed; returning no folders"
                );
                Vec::new()
            }
        };

        Ok(reconciler::collect_folders(folder_path, &objects))
    }
}
