//! Role entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use filegate_core::types::Capability;

/// A named bundle of capabilities.
///
/// Roles are global: a role grant applies regardless of folder. They are
/// many-to-many with users via the `user_roles` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique role identifier.
    pub id: Uuid,
    /// Unique role name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// May list folders and download files.
    pub can_read: bool,
    /// May upload files and create folders.
    pub can_write: bool,
    /// May copy files.
    pub can_copy: bool,
    /// May delete files.
    pub can_delete: bool,
    /// May issue share links.
    pub can_share: bool,
}

impl Role {
    /// Whether this role grants the given capability.
    pub fn grants(&self, capability: Capability) -> bool {
        match capability {
            Capability::Read => self.can_read,
            Capability::Write => self.can_write,
            Capability::Copy => self.can_copy,
            Capability::Delete => self.can_delete,
            Capability::Share => self.can_share,
        }
    }
}

/// Data required to create a new role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRole {
    /// Unique role name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Read bit.
    pub can_read: bool,
    /// Write bit.
    pub can_write: bool,
    /// Copy bit.
    pub can_copy: bool,
    /// Delete bit.
    pub can_delete: bool,
    /// Share bit.
    pub can_share: bool,
}

/// Partial update of an existing role. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRole {
    /// New description.
    pub description: Option<String>,
    /// New read bit.
    pub can_read: Option<bool>,
    /// New write bit.
    pub can_write: Option<bool>,
    /// New copy bit.
    pub can_copy: Option<bool>,
    /// New delete bit.
    pub can_delete: Option<bool>,
    /// New share bit.
    pub can_share: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer() -> Role {
        Role {
            id: Uuid::new_v4(),
            name: "Viewer".to_string(),
            description: None,
            can_read: true,
            can_write: false,
            can_copy: false,
            can_delete: false,
            can_share: false,
        }
    }

    #[test]
    fn test_grants_matches_bits() {
        let role = viewer();
        assert!(role.grants(Capability::Read));
        assert!(!role.grants(Capability::Write));
        assert!(!role.grants(Capability::Share));
    }
}
