//! Folder assignment repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use filegate_core::error::{AppError, ErrorKind};
use filegate_core::result::AppResult;
use filegate_entity::assignment::{AssignmentFlags, AssignmentWithUser, FolderAssignment};

/// Repository for per-(folder, user) grants.
#[derive(Debug, Clone)]
pub struct FolderAssignmentRepository {
    pool: PgPool,
}

impl FolderAssignmentRepository {
    /// Create a new folder assignment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The assignment for a (normalized folder path, user) pair, if any.
    pub async fn find_by_folder_and_user(
        &self,
        folder_path: &str,
        user_id: Uuid,
    ) -> AppResult<Option<FolderAssignment>> {
        sqlx::query_as::<_, FolderAssignment>(
            "SELECT * FROM folder_assignments WHERE folder_path = $1 AND user_id = $2",
        )
        .bind(folder_path)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find assignment", e))
    }

    /// All assignments for a user.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<FolderAssignment>> {
        sqlx::query_as::<_, FolderAssignment>(
            "SELECT * FROM folder_assignments WHERE user_id = $1 ORDER BY folder_path ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list user assignments", e)
        })
    }

    /// A user's readable assignments (the `my-folders` view).
    pub async fn find_readable_by_user(&self, user_id: Uuid) -> AppResult<Vec<FolderAssignment>> {
        sqlx::query_as::<_, FolderAssignment>(
            "SELECT * FROM folder_assignments \
             WHERE user_id = $1 AND can_read = TRUE ORDER BY folder_path ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list readable folders", e)
        })
    }

    /// Every assignment in the system, joined with usernames.
    pub async fn list_all_with_user(&self) -> AppResult<Vec<AssignmentWithUser>> {
        sqlx::query_as::<_, AssignmentWithUser>(
            "SELECT a.*, u.username FROM folder_assignments a \
             LEFT JOIN users u ON u.id = a.user_id \
             ORDER BY a.folder_path ASC, a.assigned_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list assignments", e))
    }

    /// All assignments on a folder, joined with usernames.
    pub async fn find_by_folder_with_user(
        &self,
        folder_path: &str,
    ) -> AppResult<Vec<AssignmentWithUser>> {
        sqlx::query_as::<_, AssignmentWithUser>(
            "SELECT a.*, u.username FROM folder_assignments a \
             LEFT JOIN users u ON u.id = a.user_id \
             WHERE a.folder_path = $1 ORDER BY u.username ASC",
        )
        .bind(folder_path)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list folder assignments", e)
        })
    }

    /// Insert a fresh assignment.
    pub async fn create(
        &self,
        folder_path: &str,
        user_id: Uuid,
        flags: AssignmentFlags,
        assigned_by: Uuid,
    ) -> AppResult<FolderAssignment> {
        sqlx::query_as::<_, FolderAssignment>(
            "INSERT INTO folder_assignments \
             (folder_path, user_id, can_read, can_write, can_delete, assigned_by) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(folder_path)
        .bind(user_id)
        .bind(flags.can_read)
        .bind(flags.can_write)
        .bind(flags.can_delete)
        .bind(assigned_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create assignment", e))
    }

    /// Overwrite the three grant bits of an existing assignment in place.
    ///
    /// `assigned_by` and `assigned_at` deliberately keep their original
    /// values — re-assignment is an update, not a new grant.
    pub async fn update_flags(
        &self,
        id: Uuid,
        flags: AssignmentFlags,
    ) -> AppResult<FolderAssignment> {
        sqlx::query_as::<_, FolderAssignment>(
            "UPDATE folder_assignments \
             SET can_read = $2, can_write = $3, can_delete = $4 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(flags.can_read)
        .bind(flags.can_write)
        .bind(flags.can_delete)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update assignment", e))?
        .ok_or_else(|| AppError::not_found(format!("Assignment {id} not found")))
    }

    /// Hard-delete an assignment by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folder_assignments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete assignment", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete the assignment for a (folder, user) pair.
    pub async fn delete_by_folder_and_user(
        &self,
        folder_path: &str,
        user_id: Uuid,
    ) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM folder_assignments WHERE folder_path = $1 AND user_id = $2")
                .bind(folder_path)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete assignment", e)
                })?;
        Ok(result.rows_affected() > 0)
    }
}
