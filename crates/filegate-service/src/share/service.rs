//! Share issuing.
//!
//! Two mechanisms coexist. A direct presign hands out a signed download
//! URL and persists nothing — the signature's own expiry is the only
//! durable state. A token-backed link persists a [`ShareLink`] row whose
//! `expires_at` is checked on resolution before a fresh one-hour URL is
//! minted, so both the row expiry and the signature expiry apply and the
//! shorter wins.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use filegate_auth::capability;
use filegate_core::config::storage::ObjectStorageConfig;
use filegate_core::error::AppError;
use filegate_core::traits::storage::ObjectStore;
use filegate_core::types::Capability;
use filegate_database::repositories::file::FileRepository;
use filegate_database::repositories::share::ShareLinkRepository;
use filegate_entity::share::{CreateShareLink, ShareLink};
use filegate_entity::user::Principal;

/// Length of generated share tokens.
const TOKEN_LENGTH: usize = 48;

/// A directly-presigned share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedUrl {
    /// The signed download URL.
    pub share_url: String,
    /// When the signature stops working.
    pub expires_at: DateTime<Utc>,
    /// The effective (clamped) lifetime in hours.
    pub expires_in_hours: i64,
}

/// A resolved token-backed share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedFile {
    /// Display filename.
    pub filename: String,
    /// Size in bytes, when known.
    pub size_bytes: Option<i64>,
    /// MIME type, when known.
    pub content_type: Option<String>,
    /// Fresh one-hour download URL.
    pub download_url: String,
}

/// Issues and resolves shares.
#[derive(Debug, Clone)]
pub struct ShareService {
    file_repo: Arc<FileRepository>,
    share_repo: Arc<ShareLinkRepository>,
    store: Arc<dyn ObjectStore>,
    max_hours: i64,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        share_repo: Arc<ShareLinkRepository>,
        store: Arc<dyn ObjectStore>,
        config: &ObjectStorageConfig,
    ) -> Self {
        Self {
            file_repo,
            share_repo,
            store,
            max_hours: config.share_max_hours,
        }
    }

    /// Presign a download URL with a clamped expiry. Nothing is persisted.
    pub async fn create_share_url(
        &self,
        principal: &Principal,
        file_id: Uuid,
        expires_in_hours: i64,
    ) -> Result<SharedUrl, AppError> {
        capability::require(principal, Capability::Share, None)?;

        let hours = clamp_share_hours(expires_in_hours, self.max_hours);

        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        let share_url = self
            .store
            .presign_download(&file.object_key, Duration::from_secs(hours as u64 * 3600))
            .await?;

        info!(
            user_id = %principal.user_id(),
            file_id = %file_id,
            hours,
            "Share URL issued"
        );

        Ok(SharedUrl {
            share_url,
            expires_at: Utc::now() + chrono::Duration::hours(hours),
            expires_in_hours: hours,
        })
    }

    /// Persist a token-backed share link with a clamped expiry.
    pub async fn create_share_token(
        &self,
        principal: &Principal,
        file_id: Uuid,
        expires_in_hours: i64,
    ) -> Result<ShareLink, AppError> {
        capability::require(principal, Capability::Share, None)?;

        let hours = clamp_share_hours(expires_in_hours, self.max_hours);

        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        let link = self
            .share_repo
            .create(&CreateShareLink {
                file_id: file.id,
                token: generate_token(),
                expires_at: Utc::now() + chrono::Duration::hours(hours),
                created_by: Some(principal.user_id()),
            })
            .await?;

        info!(
            user_id = %principal.user_id(),
            file_id = %file_id,
            share_id = %link.id,
            "Share token created"
        );

        Ok(link)
    }

    /// Resolve a share token into a fresh one-hour download URL.
    ///
    /// No principal is involved: possession of a live token is the
    /// authorization. An expired row is `Expired`, distinct from an
    /// unknown token.
    pub async fn resolve_share_token(&self, token: &str) -> Result<SharedFile, AppError> {
        let link = self
            .share_repo
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Share link not found"))?;

        if link.is_expired(Utc::now()) {
            return Err(AppError::expired("Share link has expired"));
        }

        let file = self
            .file_repo
            .find_by_id(link.file_id)
            .await?
            .ok_or_else(|| AppError::not_found("Shared file no longer exists"))?;

        let download_url = self
            .store
            .presign_download(&file.object_key, Duration::from_secs(3600))
            .await?;

        Ok(SharedFile {
            filename: file.filename,
            size_bytes: file.size_bytes,
            content_type: file.content_type,
            download_url,
        })
    }
}

/// Clamp a requested share lifetime to `1..=max` hours.
fn clamp_share_hours(requested: i64, max: i64) -> i64 {
    requested.clamp(1, max)
}

/// A random URL-safe alphanumeric token.
fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_share_hours() {
        assert_eq!(clamp_share_hours(999, 12), 12);
        assert_eq!(clamp_share_hours(12, 12), 12);
        assert_eq!(clamp_share_hours(3, 12), 3);
        assert_eq!(clamp_share_hours(0, 12), 1);
        assert_eq!(clamp_share_hours(-5, 12), 1);
    }

    #[test]
    fn test_tokens_are_long_and_distinct() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), TOKEN_LENGTH);
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
