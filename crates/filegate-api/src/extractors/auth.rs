//! Auth extractors — pull the JWT from the Authorization header,
//! validate it, and assemble the full [`Principal`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use filegate_core::error::AppError;
use filegate_entity::user::Principal;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated principal available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl std::ops::Deref for AuthUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let claims = state.jwt_decoder.decode(token)?;

        // Roles and folder assignments are loaded here, once, so every
        // downstream capability check is a pure in-memory resolve.
        let principal = state.user_service.load_principal(claims.user_id()).await?;

        Ok(AuthUser(principal))
    }
}

/// Like [`AuthUser`], but rejects non-administrators.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Principal);

impl std::ops::Deref for AdminUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(principal) = AuthUser::from_request_parts(parts, state).await?;

        if !principal.is_admin() {
            return Err(AppError::authorization("Not enough permissions").into());
        }

        Ok(AdminUser(principal))
    }
}
