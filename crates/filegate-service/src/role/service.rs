//! Role administration.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use filegate_core::error::AppError;
use filegate_database::repositories::role::RoleRepository;
use filegate_entity::user::{CreateRole, Principal, Role, UpdateRole};

/// Manages the global capability bundles.
#[derive(Debug, Clone)]
pub struct RoleService {
    role_repo: Arc<RoleRepository>,
}

impl RoleService {
    /// Creates a new role service.
    pub fn new(role_repo: Arc<RoleRepository>) -> Self {
        Self { role_repo }
    }

    /// Create a role; duplicate names conflict.
    pub async fn create_role(&self, actor: &Principal, data: CreateRole) -> Result<Role, AppError> {
        let role = self.role_repo.create(&data).await?;
        info!(actor = %actor.user_id(), role = %role.name, "Role created");
        Ok(role)
    }

    /// All roles.
    pub async fn list_roles(&self) -> Result<Vec<Role>, AppError> {
        self.role_repo.list_all().await
    }

    /// Apply a partial update to a role.
    pub async fn update_role(
        &self,
        actor: &Principal,
        role_id: Uuid,
        update: UpdateRole,
    ) -> Result<Role, AppError> {
        let role = self.role_repo.update(role_id, &update).await?;
        info!(actor = %actor.user_id(), role = %role.name, "Role updated");
        Ok(role)
    }

    /// Delete a role.
    pub async fn delete_role(&self, actor: &Principal, role_id: Uuid) -> Result<(), AppError> {
        if !self.role_repo.delete(role_id).await? {
            return Err(AppError::not_found("Role not found"));
        }
        info!(actor = %actor.user_id(), role_id = %role_id, "Role deleted");
        Ok(())
    }
}
