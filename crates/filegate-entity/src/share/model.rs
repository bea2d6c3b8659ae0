//! Share link entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted, token-addressable share of a single file.
///
/// Resolving the token mints a fresh short-lived presigned URL; the row's
/// own `expires_at` is checked first, so both the database expiry and the
/// signature expiry apply and the shorter wins.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShareLink {
    /// Unique share identifier.
    pub id: Uuid,
    /// The shared file.
    pub file_id: Uuid,
    /// Opaque URL-safe token.
    pub token: String,
    /// When the link stops resolving.
    pub expires_at: DateTime<Utc>,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
    /// The issuing user.
    pub created_by: Option<Uuid>,
}

impl ShareLink {
    /// Whether the link is past its expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// Data required to persist a new share link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareLink {
    /// The shared file.
    pub file_id: Uuid,
    /// Opaque token.
    pub token: String,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
    /// The issuing user.
    pub created_by: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let link = ShareLink {
            id: Uuid::new_v4(),
            file_id: Uuid::new_v4(),
            token: "t".to_string(),
            expires_at: now - Duration::seconds(1),
            created_at: now - Duration::hours(1),
            created_by: None,
        };
        assert!(link.is_expired(now));
        assert!(!link.is_expired(now - Duration::seconds(2)));
    }
}
