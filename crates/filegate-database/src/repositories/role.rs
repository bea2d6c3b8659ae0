//! Role repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use filegate_core::error::{AppError, ErrorKind};
use filegate_core::result::AppResult;
use filegate_entity::user::{CreateRole, Role, UpdateRole};

/// Repository for role CRUD.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a role by its unique name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find role by name", e)
            })
    }

    /// List all roles ordered by name.
    pub async fn list_all(&self) -> AppResult<Vec<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list roles", e))
    }

    /// Create a new role.
    pub async fn create(&self, data: &CreateRole) -> AppResult<Role> {
        sqlx::query_as::<_, Role>(
            "INSERT INTO roles (name, description, can_read, can_write, can_copy, can_delete, can_share) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.can_read)
        .bind(data.can_write)
        .bind(data.can_copy)
        .bind(data.can_delete)
        .bind(data.can_share)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("roles_name_key") => {
                AppError::conflict(format!("Role name '{}' already exists", data.name))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create role", e),
        })
    }

    /// Apply a partial update to a role.
    pub async fn update(&self, id: Uuid, data: &UpdateRole) -> AppResult<Role> {
        sqlx::query_as::<_, Role>(
            "UPDATE roles SET \
             description = COALESCE($2, description), \
             can_read = COALESCE($3, can_read), \
             can_write = COALESCE($4, can_write), \
             can_copy = COALESCE($5, can_copy), \
             can_delete = COALESCE($6, can_delete), \
             can_share = COALESCE($7, can_share) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.description)
        .bind(data.can_read)
        .bind(data.can_write)
        .bind(data.can_copy)
        .bind(data.can_delete)
        .bind(data.can_share)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update role", e))?
        .ok_or_else(|| AppError::not_found(format!("Role {id} not found")))
    }

    /// Delete a role.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete role", e))?;
        Ok(result.rows_affected() > 0)
    }
}
