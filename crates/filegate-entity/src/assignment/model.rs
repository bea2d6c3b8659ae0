//! Folder assignment entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use filegate_core::types::Capability;

/// A per-(folder, user) grant of read/write/delete.
///
/// The path is stored normalized (leading `/`, no trailing `/`, root is
/// `"/"`) and the pair `(folder_path, user_id)` is unique — re-assignment
/// overwrites the flags in place. Copy and share have no folder-scoped
/// form; an assignment can never satisfy them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FolderAssignment {
    /// Unique assignment identifier.
    pub id: Uuid,
    /// Normalized folder path.
    pub folder_path: String,
    /// The granted user.
    pub user_id: Uuid,
    /// Read bit.
    pub can_read: bool,
    /// Write bit.
    pub can_write: bool,
    /// Delete bit.
    pub can_delete: bool,
    /// The admin who granted the assignment.
    pub assigned_by: Option<Uuid>,
    /// When the assignment was first created.
    pub assigned_at: DateTime<Utc>,
}

impl FolderAssignment {
    /// Whether this assignment grants the given capability.
    ///
    /// Always false for copy/share — those exist only on roles.
    pub fn grants(&self, capability: Capability) -> bool {
        match capability {
            Capability::Read => self.can_read,
            Capability::Write => self.can_write,
            Capability::Delete => self.can_delete,
            Capability::Copy | Capability::Share => false,
        }
    }
}

/// An assignment row joined with the granted user's username for display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssignmentWithUser {
    /// The assignment.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub assignment: FolderAssignment,
    /// Username of the granted user; `None` when the user is gone.
    pub username: Option<String>,
}

/// The three grantable bits, as carried by assignment requests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AssignmentFlags {
    /// Read bit.
    pub can_read: bool,
    /// Write bit.
    pub can_write: bool,
    /// Delete bit.
    pub can_delete: bool,
}

impl Default for AssignmentFlags {
    fn default() -> Self {
        Self {
            can_read: true,
            can_write: false,
            can_delete: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(read: bool, write: bool, delete: bool) -> FolderAssignment {
        FolderAssignment {
            id: Uuid::new_v4(),
            folder_path: "/docs".to_string(),
            user_id: Uuid::new_v4(),
            can_read: read,
            can_write: write,
            can_delete: delete,
            assigned_by: None,
            assigned_at: Utc::now(),
        }
    }

    #[test]
    fn test_grants_only_folder_scoped_bits() {
        let a = assignment(true, true, true);
        assert!(a.grants(Capability::Read));
        assert!(a.grants(Capability::Write));
        assert!(a.grants(Capability::Delete));
        assert!(!a.grants(Capability::Copy));
        assert!(!a.grants(Capability::Share));
    }
}
