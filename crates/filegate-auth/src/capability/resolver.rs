//! The layered capability resolver.
//!
//! Three layers, checked in order: the admin flag (absolute override),
//! role capability bits (global, never folder-scoped), and folder
//! assignments (read/write/delete only, exact normalized-path match).
//! Resolution is a pure function over an assembled [`Principal`] — it
//! never touches a store and never errors.

use filegate_core::error::AppError;
use filegate_core::types::Capability;
use filegate_core::types::path::normalize_folder_path;
use filegate_entity::user::Principal;

/// Whether the principal may perform `capability`, optionally scoped to a
/// folder.
///
/// With `folder_path` set, the assignment layer only considers a grant on
/// exactly that folder (after normalization) — a grant on `/a` does not
/// extend to `/a/b`. Without it, any assignment carrying the bit
/// qualifies, which is how folder-assigned users pass the global
/// capability gate before the per-folder view is computed.
pub fn resolve(principal: &Principal, capability: Capability, folder_path: Option<&str>) -> bool {
    if principal.is_admin() {
        return true;
    }

    if principal.roles.iter().any(|role| role.grants(capability)) {
        return true;
    }

    // Copy and share have no folder-scoped form.
    if !capability.folder_scoped() {
        return false;
    }

    let target = folder_path.map(normalize_folder_path);
    principal.assignments.iter().any(|assignment| {
        target
            .as_deref()
            .is_none_or(|t| assignment.folder_path == t)
            && assignment.grants(capability)
    })
}

/// Like [`resolve`], but converts a denial into an authorization error.
pub fn require(
    principal: &Principal,
    capability: Capability,
    folder_path: Option<&str>,
) -> Result<(), AppError> {
    if resolve(principal, capability, folder_path) {
        Ok(())
    } else {
        Err(AppError::authorization(format!(
            "You don't have permission to {capability} files"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use filegate_entity::assignment::FolderAssignment;
    use filegate_entity::user::{Role, User};
    use uuid::Uuid;

    fn user(is_admin: bool) -> User {
        User {
            id: Uuid::new_v4(),
            username: "u".to_string(),
            email: None,
            password_hash: String::new(),
            is_active: true,
            is_admin,
            created_at: Utc::now(),
            created_by: None,
        }
    }

    fn role(read: bool, write: bool, copy: bool, delete: bool, share: bool) -> Role {
        Role {
            id: Uuid::new_v4(),
            name: "r".to_string(),
            description: None,
            can_read: read,
            can_write: write,
            can_copy: copy,
            can_delete: delete,
            can_share: share,
        }
    }

    fn assignment(user_id: Uuid, path: &str, read: bool, write: bool, delete: bool) -> FolderAssignment {
        FolderAssignment {
            id: Uuid::new_v4(),
            folder_path: path.to_string(),
            user_id,
            can_read: read,
            can_write: write,
            can_delete: delete,
            assigned_by: None,
            assigned_at: Utc::now(),
        }
    }

    const ALL: [Capability; 5] = [
        Capability::Read,
        Capability::Write,
        Capability::Copy,
        Capability::Delete,
        Capability::Share,
    ];

    #[test]
    fn test_admin_overrides_everything() {
        let principal = Principal {
            user: user(true),
            roles: vec![],
            assignments: vec![],
        };
        for cap in ALL {
            assert!(resolve(&principal, cap, None));
            assert!(resolve(&principal, cap, Some("/anywhere")));
        }
    }

    #[test]
    fn test_role_bits_are_global() {
        let principal = Principal {
            user: user(false),
            roles: vec![role(true, false, true, false, false)],
            assignments: vec![],
        };
        assert!(resolve(&principal, Capability::Read, None));
        assert!(resolve(&principal, Capability::Copy, Some("/any/folder")));
        assert!(!resolve(&principal, Capability::Write, None));
        assert!(!resolve(&principal, Capability::Delete, None));
        assert!(!resolve(&principal, Capability::Share, None));
    }

    #[test]
    fn test_any_role_in_the_set_suffices() {
        let principal = Principal {
            user: user(false),
            roles: vec![
                role(true, false, false, false, false),
                role(false, true, false, false, false),
            ],
            assignments: vec![],
        };
        assert!(resolve(&principal, Capability::Read, None));
        assert!(resolve(&principal, Capability::Write, None));
        assert!(!resolve(&principal, Capability::Delete, None));
    }

    #[test]
    fn test_assignment_grants_unscoped_check() {
        let u = user(false);
        let uid = u.id;
        let principal = Principal {
            user: u,
            roles: vec![],
            assignments: vec![assignment(uid, "/docs", true, true, false)],
        };
        assert!(resolve(&principal, Capability::Read, None));
        assert!(resolve(&principal, Capability::Write, None));
        assert!(!resolve(&principal, Capability::Delete, None));
    }

    #[test]
    fn test_assignment_never_grants_copy_or_share() {
        let u = user(false);
        let uid = u.id;
        let principal = Principal {
            user: u,
            roles: vec![],
            assignments: vec![assignment(uid, "/docs", true, true, true)],
        };
        assert!(!resolve(&principal, Capability::Copy, None));
        assert!(!resolve(&principal, Capability::Share, None));
        assert!(!resolve(&principal, Capability::Copy, Some("/docs")));
        assert!(!resolve(&principal, Capability::Share, Some("/docs")));
    }

    #[test]
    fn test_folder_scope_is_exact_match() {
        let u = user(false);
        let uid = u.id;
        let principal = Principal {
            user: u,
            roles: vec![],
            assignments: vec![assignment(uid, "/a", true, false, false)],
        };
        assert!(resolve(&principal, Capability::Read, Some("/a")));
        // Unnormalized spellings of the same folder still match.
        assert!(resolve(&principal, Capability::Read, Some("a/")));
        // No ancestor inheritance.
        assert!(!resolve(&principal, Capability::Read, Some("/a/b")));
        assert!(!resolve(&principal, Capability::Read, Some("/b")));
    }

    #[test]
    fn test_no_grants_means_denied() {
        let principal = Principal {
            user: user(false),
            roles: vec![],
            assignments: vec![],
        };
        for cap in ALL {
            assert!(!resolve(&principal, cap, None));
        }
        assert!(require(&principal, Capability::Read, None).is_err());
    }
}
