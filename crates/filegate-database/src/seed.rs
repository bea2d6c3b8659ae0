//! Idempotent bootstrap seeding: default roles and the initial admin.

use sqlx::PgPool;
use tracing::info;

use filegate_core::result::AppResult;
use filegate_entity::user::CreateRole;

use crate::repositories::role::RoleRepository;
use crate::repositories::user::UserRepository;

/// Capability bundles created on first startup.
fn default_roles() -> Vec<CreateRole> {
    vec![
        CreateRole {
            name: "Admin".to_string(),
            description: Some("Full access to all features".to_string()),
            can_read: true,
            can_write: true,
            can_copy: true,
            can_delete: true,
            can_share: true,
        },
        CreateRole {
            name: "Editor".to_string(),
            description: Some("Can read, write, and share files".to_string()),
            can_read: true,
            can_write: true,
            can_copy: false,
            can_delete: false,
            can_share: true,
        },
        CreateRole {
            name: "Viewer".to_string(),
            description: Some("Can only view files".to_string()),
            can_read: true,
            can_write: false,
            can_copy: false,
            can_delete: false,
            can_share: false,
        },
        CreateRole {
            name: "Contributor".to_string(),
            description: Some("Can read, write, and copy files".to_string()),
            can_read: true,
            can_write: true,
            can_copy: true,
            can_delete: false,
            can_share: false,
        },
    ]
}

/// Ensure the default roles and a bootstrap admin account exist.
///
/// Safe to run on every startup: existing rows are left untouched. The
/// admin password arrives pre-hashed so this crate stays free of crypto
/// dependencies.
pub async fn ensure_seed_data(
    pool: &PgPool,
    admin_username: &str,
    admin_email: &str,
    admin_password_hash: &str,
) -> AppResult<()> {
    let role_repo = RoleRepository::new(pool.clone());
    let user_repo = UserRepository::new(pool.clone());

    for role in default_roles() {
        if role_repo.find_by_name(&role.name).await?.is_none() {
            role_repo.create(&role).await?;
            info!(role = %role.name, "Seeded default role");
        }
    }

    if user_repo.find_by_username(admin_username).await?.is_none() {
        let admin = user_repo
            .create(&filegate_entity::user::CreateUser {
                username: admin_username.to_string(),
                email: Some(admin_email.to_string()),
                password_hash: admin_password_hash.to_string(),
                is_admin: true,
                created_by: None,
            })
            .await?;

        if let Some(admin_role) = role_repo.find_by_name("Admin").await? {
            user_repo.set_roles(admin.id, &[admin_role.id]).await?;
        }
        info!(username = %admin_username, "Seeded bootstrap admin account");
    }

    Ok(())
}
