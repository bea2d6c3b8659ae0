//! User administration and credential verification.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use filegate_auth::password::PasswordHasher;
use filegate_core::error::AppError;
use filegate_database::repositories::assignment::FolderAssignmentRepository;
use filegate_database::repositories::user::UserRepository;
use filegate_entity::user::{CreateUser, Principal, Role, UpdateUser, User};

/// A user with their role memberships, for admin listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserWithRoles {
    /// The user.
    #[serde(flatten)]
    pub user: User,
    /// Their roles.
    pub roles: Vec<Role>,
}

/// Manages accounts and verifies credentials.
#[derive(Debug, Clone)]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    assignment_repo: Arc<FolderAssignmentRepository>,
    hasher: Arc<PasswordHasher>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        assignment_repo: Arc<FolderAssignmentRepository>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            user_repo,
            assignment_repo,
            hasher,
        }
    }

    /// Verify a username/password pair.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller; inactive accounts are rejected after the password check so
    /// the error does not leak whether the credentials were right.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::authentication("Incorrect username or password"))?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(AppError::authentication("Incorrect username or password"));
        }

        if !user.is_active {
            return Err(AppError::authorization("User account is inactive"));
        }

        Ok(user)
    }

    /// Assemble the full principal for a user ID.
    ///
    /// Inactive and deleted accounts fail here, which is what invalidates
    /// outstanding tokens for them.
    pub async fn load_principal(&self, user_id: Uuid) -> Result<Principal, AppError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::authentication("Could not validate credentials"))?;

        if !user.is_active {
            return Err(AppError::authentication("Inactive user"));
        }

        let roles = self.user_repo.find_roles(user.id).await?;
        let assignments = self.assignment_repo.find_by_user(user.id).await?;

        Ok(Principal {
            user,
            roles,
            assignments,
        })
    }

    /// Create a user (admin operation; gating happens at the API layer).
    pub async fn create_user(
        &self,
        actor: &Principal,
        username: &str,
        password: &str,
        email: Option<String>,
        is_admin: bool,
        role_ids: &[Uuid],
    ) -> Result<UserWithRoles, AppError> {
        let user = self
            .user_repo
            .create(&CreateUser {
                username: username.to_string(),
                email,
                password_hash: self.hasher.hash(password)?,
                is_admin,
                created_by: Some(actor.user_id()),
            })
            .await?;

        if !role_ids.is_empty() {
            self.user_repo.set_roles(user.id, role_ids).await?;
        }
        let roles = self.user_repo.find_roles(user.id).await?;

        info!(
            actor = %actor.user_id(),
            user_id = %user.id,
            username = %user.username,
            "User created"
        );

        Ok(UserWithRoles { user, roles })
    }

    /// All users with their roles.
    pub async fn list_users(&self) -> Result<Vec<UserWithRoles>, AppError> {
        let users = self.user_repo.list_all().await?;
        let mut result = Vec::with_capacity(users.len());
        for user in users {
            let roles = self.user_repo.find_roles(user.id).await?;
            result.push(UserWithRoles { user, roles });
        }
        Ok(result)
    }

    /// Apply a partial update, optionally replacing the role set.
    pub async fn update_user(
        &self,
        actor: &Principal,
        user_id: Uuid,
        update: UpdateUser,
        role_ids: Option<Vec<Uuid>>,
    ) -> Result<UserWithRoles, AppError> {
        let user = self.user_repo.update(user_id, &update).await?;

        if let Some(role_ids) = role_ids {
            self.user_repo.set_roles(user_id, &role_ids).await?;
        }
        let roles = self.user_repo.find_roles(user_id).await?;

        info!(actor = %actor.user_id(), user_id = %user_id, "User updated");
        Ok(UserWithRoles { user, roles })
    }

    /// Delete a user. Self-deletion is refused.
    pub async fn delete_user(&self, actor: &Principal, user_id: Uuid) -> Result<(), AppError> {
        if user_id == actor.user_id() {
            return Err(AppError::validation("Cannot delete yourself"));
        }

        if !self.user_repo.delete(user_id).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(actor = %actor.user_id(), user_id = %user_id, "User deleted");
        Ok(())
    }
}
