//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use trackify_core::config::AuthConfig;
use trackify_core::error::AppError;

use super::claims::Claims;

/// Validates JWT access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string, checking signature
    /// and expiration.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthorized("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthorized("Invalid token signature")
                    }
                    _ => AppError::unauthorized(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use trackify_entity::user::UserRole;
    use uuid::Uuid;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-key-for-unit-tests".to_string(),
            jwt_access_ttl_minutes: 60,
            reset_token_ttl_minutes: 30,
            password_min_length: 6,
        }
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let cfg = config();
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);
        let user_id = Uuid::new_v4();

        let (token, _) = encoder
            .generate_access_token(user_id, UserRole::Manager, "Bob")
            .unwrap();
        let claims = decoder.decode_access_token(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, UserRole::Manager);
        assert_eq!(claims.name, "Bob");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let encoder = JwtEncoder::new(&config());
        let other = AuthConfig {
            jwt_secret: "a-different-secret".to_string(),
            ..config()
        };
        let decoder = JwtDecoder::new(&other);

        let (token, _) = encoder
            .generate_access_token(Uuid::new_v4(), UserRole::Employee, "Eve")
            .unwrap();
        assert!(decoder.decode_access_token(&token).is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let decoder = JwtDecoder::new(&config());
        assert!(decoder.decode_access_token("not.a.token").is_err());
    }
}
