//! Filegate server — multi-tenant file-hosting control plane.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use filegate_core::config::AppConfig;
use filegate_core::error::AppError;
use filegate_core::traits::storage::ObjectStore;

#[tokio::main]
async fn main() {
    let env = std::env::var("FILEGATE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Filegate v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations + seed ──────────────────
    tracing::info!("Connecting to database...");
    let db = filegate_database::DatabasePool::connect(&config.database).await?;
    let db_pool = db.into_pool();

    filegate_database::migration::run_migrations(&db_pool).await?;

    let password_hasher = Arc::new(filegate_auth::password::PasswordHasher::new());
    let admin_hash = password_hasher.hash(&config.auth.bootstrap_admin_password)?;
    filegate_database::seed::ensure_seed_data(
        &db_pool,
        &config.auth.bootstrap_admin_username,
        &config.auth.bootstrap_admin_email,
        &admin_hash,
    )
    .await?;

    // ── Object store ─────────────────────────────────────────────
    let store: Arc<dyn ObjectStore> =
        Arc::new(filegate_storage::S3ObjectStore::new(&config.storage).await?);

    // ── Repositories ─────────────────────────────────────────────
    let user_repo = Arc::new(filegate_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let role_repo = Arc::new(filegate_database::repositories::role::RoleRepository::new(
        db_pool.clone(),
    ));
    let file_repo = Arc::new(filegate_database::repositories::file::FileRepository::new(
        db_pool.clone(),
    ));
    let share_repo = Arc::new(
        filegate_database::repositories::share::ShareLinkRepository::new(db_pool.clone()),
    );
    let assignment_repo = Arc::new(
        filegate_database::repositories::assignment::FolderAssignmentRepository::new(
            db_pool.clone(),
        ),
    );

    // ── Auth ─────────────────────────────────────────────────────
    let jwt_encoder = Arc::new(filegate_auth::jwt::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(filegate_auth::jwt::JwtDecoder::new(&config.auth));

    // ── Services ─────────────────────────────────────────────────
    let user_service = Arc::new(filegate_service::user::UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&assignment_repo),
        Arc::clone(&password_hasher),
    ));
    let role_service = Arc::new(filegate_service::role::RoleService::new(Arc::clone(
        &role_repo,
    )));
    let listing_service = Arc::new(filegate_service::listing::ListingService::new(
        Arc::clone(&file_repo),
        Arc::clone(&store),
    ));
    let file_service = Arc::new(filegate_service::file::FileService::new(
        Arc::clone(&file_repo),
        Arc::clone(&store),
        &config.storage,
    ));
    let share_service = Arc::new(filegate_service::share::ShareService::new(
        Arc::clone(&file_repo),
        Arc::clone(&share_repo),
        Arc::clone(&store),
        &config.storage,
    ));
    let assignment_service = Arc::new(filegate_service::assignment::AssignmentService::new(
        Arc::clone(&assignment_repo),
        Arc::clone(&user_repo),
    ));

    // ── HTTP server ──────────────────────────────────────────────
    let app_state = filegate_api::AppState {
        config: Arc::new(config.clone()),
        jwt_encoder,
        jwt_decoder,
        user_service,
        role_service,
        listing_service,
        file_service,
        share_service,
        assignment_service,
    };

    let app = filegate_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Filegate server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Filegate server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
