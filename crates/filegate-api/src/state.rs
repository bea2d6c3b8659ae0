//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use filegate_auth::jwt::{JwtDecoder, JwtEncoder};
use filegate_core::config::AppConfig;
use filegate_service::assignment::AssignmentService;
use filegate_service::file::FileService;
use filegate_service::listing::ListingService;
use filegate_service::role::RoleService;
use filegate_service::share::ShareService;
use filegate_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,

    /// JWT token encoder.
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,

    /// User administration and principal assembly.
    pub user_service: Arc<UserService>,
    /// Role administration.
    pub role_service: Arc<RoleService>,
    /// Folder listing reconciliation.
    pub listing_service: Arc<ListingService>,
    /// File lifecycle operations.
    pub file_service: Arc<FileService>,
    /// Share issuing and resolution.
    pub share_service: Arc<ShareService>,
    /// Folder assignment management.
    pub assignment_service: Arc<AssignmentService>,
}
