//! Health check handler.

use axum::Json;

/// GET /api/health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "filegate",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
