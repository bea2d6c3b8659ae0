//! The authenticated principal: a user together with everything the
//! capability resolver needs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::User;
use super::role::Role;
use crate::assignment::FolderAssignment;

/// An authenticated user with their role memberships and folder grants.
///
/// Assembled once per request by the auth layer so that permission
/// resolution is a pure in-memory check — no query runs between "is this
/// allowed" and the operation itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// The account making the request.
    pub user: User,
    /// Role memberships (global capability bundles).
    pub roles: Vec<Role>,
    /// Folder-scoped grants.
    pub assignments: Vec<FolderAssignment>,
}

impl Principal {
    /// The user's ID.
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    /// The username.
    pub fn username(&self) -> &str {
        &self.user.username
    }

    /// Whether the principal is an administrator.
    pub fn is_admin(&self) -> bool {
        self.user.is_admin
    }
}
