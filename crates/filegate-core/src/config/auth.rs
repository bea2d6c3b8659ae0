//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// JWT and bootstrap-account settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for signing access tokens.
    #[serde(default = "default_secret")]
    pub jwt_secret: String,
    /// Access token lifetime in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: i64,
    /// Username of the seeded bootstrap administrator.
    #[serde(default = "default_admin_username")]
    pub bootstrap_admin_username: String,
    /// Password of the seeded bootstrap administrator.
    #[serde(default = "default_admin_password")]
    pub bootstrap_admin_password: String,
    /// Email of the seeded bootstrap administrator.
    #[serde(default = "default_admin_email")]
    pub bootstrap_admin_email: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_secret(),
            token_ttl_minutes: default_token_ttl(),
            bootstrap_admin_username: default_admin_username(),
            bootstrap_admin_password: default_admin_password(),
            bootstrap_admin_email: default_admin_email(),
        }
    }
}

fn default_secret() -> String {
    "change-me-in-production".to_string()
}

fn default_token_ttl() -> i64 {
    60 * 24
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

fn default_admin_email() -> String {
    "admin@filegate.local".to_string()
}
