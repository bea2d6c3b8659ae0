//! Folder assignment management.
//!
//! Assignments are unique per (normalized folder path, user): assigning
//! an already-granted pair overwrites the three bits in place and keeps
//! the original `assigned_by`/`assigned_at`. Admin gating happens at the
//! API layer; `my_folders` is the one operation every principal may call.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use filegate_core::error::AppError;
use filegate_core::types::path::normalize_folder_path;
use filegate_database::repositories::assignment::FolderAssignmentRepository;
use filegate_database::repositories::user::UserRepository;
use filegate_entity::assignment::{AssignmentFlags, AssignmentWithUser, FolderAssignment};
use filegate_entity::user::Principal;

/// Outcome of a single-user assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    /// The resulting assignment row.
    pub assignment: FolderAssignment,
    /// Username of the granted user.
    pub username: String,
    /// Whether a new row was created (`false` means updated in place).
    pub created: bool,
}

/// Per-user outcome of a bulk assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkAssignmentOutcome {
    /// The granted user.
    pub user_id: Uuid,
    /// Their username.
    pub username: String,
    /// `"assigned"` for new rows, `"updated"` for overwrites.
    pub status: String,
}

/// Result of a bulk assignment. Unknown user IDs are silently excluded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkAssignmentResult {
    /// The normalized folder path.
    pub folder_path: String,
    /// Per-user outcomes.
    pub assignments: Vec<BulkAssignmentOutcome>,
}

/// The caller's own folder access, as returned by `my_folders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyFolders {
    /// Readable assignments; empty for admins.
    pub folders: Vec<FolderAccess>,
    /// Whether the caller is an admin.
    pub is_admin: bool,
    /// Admins see everything, so the client needs no per-folder entries.
    pub has_full_access: bool,
}

/// One readable folder in `my_folders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderAccess {
    /// The folder path.
    pub folder_path: String,
    /// Read bit.
    pub can_read: bool,
    /// Write bit.
    pub can_write: bool,
    /// Delete bit.
    pub can_delete: bool,
}

/// Manages per-user folder grants.
#[derive(Debug, Clone)]
pub struct AssignmentService {
    assignment_repo: Arc<FolderAssignmentRepository>,
    user_repo: Arc<UserRepository>,
}

impl AssignmentService {
    /// Creates a new assignment service.
    pub fn new(
        assignment_repo: Arc<FolderAssignmentRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            assignment_repo,
            user_repo,
        }
    }

    /// Grant (or re-grant) a user access to a folder.
    pub async fn assign(
        &self,
        assigner: &Principal,
        folder_path: &str,
        user_id: Uuid,
        flags: AssignmentFlags,
    ) -> Result<AssignmentOutcome, AppError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let path = normalize_folder_path(folder_path);
        let (assignment, created) = self.upsert(&path, user_id, flags, assigner).await?;

        info!(
            assigner = %assigner.user_id(),
            user_id = %user_id,
            folder = %path,
            created,
            "Folder assignment saved"
        );

        Ok(AssignmentOutcome {
            assignment,
            username: user.username,
            created,
        })
    }

    /// Grant a set of users access to a folder in one call.
    ///
    /// Each user is upserted independently; IDs that match no user are
    /// silently excluded from the result rather than failing the batch.
    pub async fn bulk_assign(
        &self,
        assigner: &Principal,
        folder_path: &str,
        user_ids: &[Uuid],
        flags: AssignmentFlags,
    ) -> Result<BulkAssignmentResult, AppError> {
        let users = self.user_repo.find_by_ids(user_ids).await?;
        if users.is_empty() {
            return Err(AppError::not_found("No users found"));
        }

        let path = normalize_folder_path(folder_path);
        let mut outcomes = Vec::with_capacity(users.len());
        for user in users {
            let (_, created) = self.upsert(&path, user.id, flags, assigner).await?;
            outcomes.push(BulkAssignmentOutcome {
                user_id: user.id,
                username: user.username,
                status: if created { "assigned" } else { "updated" }.to_string(),
            });
        }

        info!(
            assigner = %assigner.user_id(),
            folder = %path,
            count = outcomes.len(),
            "Bulk folder assignment"
        );

        Ok(BulkAssignmentResult {
            folder_path: path,
            assignments: outcomes,
        })
    }

    async fn upsert(
        &self,
        normalized_path: &str,
        user_id: Uuid,
        flags: AssignmentFlags,
        assigner: &Principal,
    ) -> Result<(FolderAssignment, bool), AppError> {
        match self
            .assignment_repo
            .find_by_folder_and_user(normalized_path, user_id)
            .await?
        {
            Some(existing) => {
                let updated = self.assignment_repo.update_flags(existing.id, flags).await?;
                Ok((updated, false))
            }
            None => {
                let created = self
                    .assignment_repo
                    .create(normalized_path, user_id, flags, assigner.user_id())
                    .await?;
                Ok((created, true))
            }
        }
    }

    /// Every assignment in the system.
    pub async fn list_all(&self) -> Result<Vec<AssignmentWithUser>, AppError> {
        self.assignment_repo.list_all_with_user().await
    }

    /// All assignments on a folder.
    pub async fn list_for_folder(
        &self,
        folder_path: &str,
    ) -> Result<Vec<AssignmentWithUser>, AppError> {
        let path = normalize_folder_path(folder_path);
        self.assignment_repo.find_by_folder_with_user(&path).await
    }

    /// All assignments for a user.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<FolderAssignment>, AppError> {
        self.assignment_repo.find_by_user(user_id).await
    }

    /// The caller's own folder access.
    pub async fn my_folders(&self, principal: &Principal) -> Result<MyFolders, AppError> {
        if principal.is_admin() {
            return Ok(MyFolders {
                folders: Vec::new(),
                is_admin: true,
                has_full_access: true,
            });
        }

        let assignments = self
            .assignment_repo
            .find_readable_by_user(principal.user_id())
            .await?;

        Ok(MyFolders {
            folders: assignments
                .into_iter()
                .map(|a| FolderAccess {
                    folder_path: a.folder_path,
                    can_read: a.can_read,
                    can_write: a.can_write,
                    can_delete: a.can_delete,
                })
                .collect(),
            is_admin: false,
            has_full_access: false,
        })
    }

    /// Remove an assignment by ID.
    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        if !self.assignment_repo.delete(id).await? {
            return Err(AppError::not_found("Assignment not found"));
        }
        info!(assignment_id = %id, "Folder assignment removed");
        Ok(())
    }

    /// Remove the assignment for a (folder, user) pair.
    pub async fn remove_by_folder_and_user(
        &self,
        folder_path: &str,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        let path = normalize_folder_path(folder_path);
        if !self
            .assignment_repo
            .delete_by_folder_and_user(&path, user_id)
            .await?
        {
            return Err(AppError::not_found("Assignment not found"));
        }
        info!(user_id = %user_id, folder = %path, "User removed from folder");
        Ok(())
    }
}
