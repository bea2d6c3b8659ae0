//! Response DTOs.

use serde::{Deserialize, Serialize};

use filegate_entity::user::{Principal, Role};

/// POST /api/auth/login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
    /// The authenticated user.
    pub user: MeResponse,
}

/// The caller's identity, as returned by login and /auth/me.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// User ID.
    pub id: uuid::Uuid,
    /// Username.
    pub username: String,
    /// Email.
    pub email: Option<String>,
    /// Admin flag.
    pub is_admin: bool,
    /// Active flag.
    pub is_active: bool,
    /// Role memberships.
    pub roles: Vec<Role>,
}

impl MeResponse {
    /// Build from an assembled principal.
    pub fn from_principal(principal: &Principal) -> Self {
        Self {
            id: principal.user.id,
            username: principal.user.username.clone(),
            email: principal.user.email.clone(),
            is_admin: principal.user.is_admin,
            is_active: principal.user.is_active,
            roles: principal.roles.clone(),
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

impl MessageResponse {
    /// Build from anything stringly.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
