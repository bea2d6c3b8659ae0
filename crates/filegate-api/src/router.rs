//! Route definitions for the Filegate HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The
//! router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(role_routes())
        .merge(file_routes())
        .merge(assignment_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: login, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// User management (admin-only)
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(handlers::user::create_user))
        .route("/users", get(handlers::user::list_users))
        .route("/users/{id}", put(handlers::user::update_user))
        .route("/users/{id}", delete(handlers::user::delete_user))
}

/// Role management
fn role_routes() -> Router<AppState> {
    Router::new()
        .route("/roles", post(handlers::role::create_role))
        .route("/roles", get(handlers::role::list_roles))
        .route("/roles/{id}", put(handlers::role::update_role))
        .route("/roles/{id}", delete(handlers::role::delete_role))
}

/// File listings, presigned transfers, folders, shares
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(handlers::file::list_files))
        .route("/files/upload-url", post(handlers::file::upload_url))
        .route(
            "/files/{id}/complete-upload",
            post(handlers::file::complete_upload),
        )
        .route("/files/folders", get(handlers::file::list_folders))
        .route(
            "/files/{id}/download-url",
            get(handlers::file::download_url),
        )
        .route(
            "/files/download-by-key/{*key}",
            get(handlers::file::download_url_by_key),
        )
        .route("/files/{id}/copy", post(handlers::file::copy_file))
        .route("/files/{id}", delete(handlers::file::delete_file))
        .route(
            "/files/by-key/{*key}",
            delete(handlers::file::delete_file_by_key),
        )
        .route("/files/bulk-delete", post(handlers::file::bulk_delete))
        .route("/files/create-folder", post(handlers::file::create_folder))
        .route("/files/{id}/share", post(handlers::file::share_file))
        .route("/files/{id}/share-token", post(handlers::file::share_token))
        .route(
            "/files/share/{token}",
            get(handlers::file::resolve_share_token),
        )
}

/// Folder assignment management
fn assignment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folder-assignments",
            post(handlers::assignment::assign_folder),
        )
        .route(
            "/folder-assignments/bulk",
            post(handlers::assignment::bulk_assign_folder),
        )
        .route(
            "/folder-assignments",
            get(handlers::assignment::list_all_assignments),
        )
        .route(
            "/folder-assignments/my-folders",
            get(handlers::assignment::my_folders),
        )
        .route(
            "/folder-assignments/folder/{*path}",
            get(handlers::assignment::list_folder_assignments),
        )
        .route(
            "/folder-assignments/user/{id}",
            get(handlers::assignment::list_user_assignments),
        )
        .route(
            "/folder-assignments/user/{id}",
            delete(handlers::assignment::remove_user_from_folder),
        )
        .route(
            "/folder-assignments/{id}",
            delete(handlers::assignment::remove_assignment),
        )
}

/// Health check (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(cors_config.max_age_seconds));

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors
}
