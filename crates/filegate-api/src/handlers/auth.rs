//! Auth handlers — login and identity.

use axum::Json;
use axum::extract::State;

use crate::dto::request::LoginRequest;
use crate::dto::response::{LoginResponse, MeResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .user_service
        .authenticate(&req.username, &req.password)
        .await?;

    let (access_token, _claims) = state.jwt_encoder.issue(&user)?;
    let principal = state.user_service.load_principal(user.id).await?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
        user: MeResponse::from_principal(&principal),
    }))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<MeResponse> {
    Json(MeResponse::from_principal(&auth))
}
