//! Access token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use filegate_core::config::auth::AuthConfig;
use filegate_core::error::AppError;

use super::claims::Claims;

/// Validates and decodes HS256 access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder").finish_non_exhaustive()
    }
}

impl JwtDecoder {
    /// Creates a decoder from configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Decodes a token, verifying the signature and expiry.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        jsonwebtoken::decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::authentication(format!("Invalid access token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use chrono::Utc;
    use filegate_entity::user::User;
    use uuid::Uuid;

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: None,
            password_hash: String::new(),
            is_active: true,
            is_admin: false,
            created_at: Utc::now(),
            created_by: None,
        }
    }

    fn config() -> filegate_core::config::auth::AuthConfig {
        filegate_core::config::auth::AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl_minutes: 60,
            ..Default::default()
        }
    }

    #[test]
    fn test_issue_and_decode_roundtrip() {
        let user = test_user();
        let (token, issued) = JwtEncoder::new(&config()).issue(&user).unwrap();

        let claims = JwtDecoder::new(&config()).decode(&token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.jti, issued.jti);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let (token, _) = JwtEncoder::new(&config()).issue(&test_user()).unwrap();

        let other = filegate_core::config::auth::AuthConfig {
            jwt_secret: "different-secret".to_string(),
            ..Default::default()
        };
        assert!(JwtDecoder::new(&other).decode(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(JwtDecoder::new(&config()).decode("not.a.jwt").is_err());
    }
}
