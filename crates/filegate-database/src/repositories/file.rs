//! File metadata repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use filegate_core::error::{AppError, ErrorKind};
use filegate_core::result::AppResult;
use filegate_entity::file::{CreateFileRecord, FileRecord, FileWithOwner};

/// Repository for file metadata rows.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a file by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FileRecord>> {
        sqlx::query_as::<_, FileRecord>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// Find all files whose ID is in the given set.
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<FileRecord>> {
        sqlx::query_as::<_, FileRecord>("SELECT * FROM files WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find files", e))
    }

    /// All metadata rows for a folder path (the exact UI path, unmodified),
    /// joined with owner usernames.
    ///
    /// This is the metadata side of the listing reconciliation.
    pub async fn find_by_folder_path_with_owner(
        &self,
        folder_path: &str,
    ) -> AppResult<Vec<FileWithOwner>> {
        sqlx::query_as::<_, FileWithOwner>(
            "SELECT f.*, u.username AS owner_username FROM files f \
             LEFT JOIN users u ON u.id = f.owner_id \
             WHERE f.folder_path = $1 ORDER BY f.uploaded_at ASC",
        )
        .bind(folder_path)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folder files", e))
    }

    /// Create a new file record.
    pub async fn create(&self, data: &CreateFileRecord) -> AppResult<FileRecord> {
        sqlx::query_as::<_, FileRecord>(
            "INSERT INTO files (filename, object_key, size_bytes, content_type, folder_path, owner_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&data.filename)
        .bind(&data.object_key)
        .bind(data.size_bytes)
        .bind(&data.content_type)
        .bind(&data.folder_path)
        .bind(data.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("files_object_key_key") =>
            {
                AppError::conflict(format!(
                    "A file already exists at key '{}'",
                    data.object_key
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create file record", e),
        })
    }

    /// Record the size reported by the object store after upload completion.
    pub async fn set_size(&self, id: Uuid, size_bytes: i64) -> AppResult<FileRecord> {
        sqlx::query_as::<_, FileRecord>(
            "UPDATE files SET size_bytes = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(size_bytes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set file size", e))?
        .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    /// Delete a file record by ID. Share links cascade at the database.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete whichever record owns the given object key, if one exists.
    pub async fn delete_by_object_key(&self, key: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE object_key = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete file by key", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete all records in the given ID set, returning the count removed.
    pub async fn delete_by_ids(&self, ids: &[Uuid]) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM files WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete files", e))?;
        Ok(result.rows_affected())
    }
}
