//! Single-use password-reset tokens.
//!
//! The plaintext token goes into the reset email; only its SHA-256 hash
//! is persisted, so a database leak does not expose usable tokens.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};

use trackify_core::config::AuthConfig;

/// A freshly issued reset token: the plaintext to email, the hash to
/// store, and the expiry.
#[derive(Debug, Clone)]
pub struct ResetToken {
    /// URL-safe plaintext token for the reset link.
    pub token: String,
    /// Hex-encoded SHA-256 hash of the token.
    pub token_hash: String,
    /// When the token stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl ResetToken {
    /// Issue a new random reset token with the configured TTL.
    pub fn issue(config: &AuthConfig) -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);
        let token_hash = Self::hash(&token);
        let expires_at = Utc::now() + Duration::minutes(config.reset_token_ttl_minutes as i64);

        Self {
            token,
            token_hash,
            expires_at,
        }
    }

    /// Hash a plaintext token the same way issued tokens are hashed.
    pub fn hash(token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test".to_string(),
            jwt_access_ttl_minutes: 60,
            reset_token_ttl_minutes: 30,
            password_min_length: 6,
        }
    }

    #[test]
    fn test_issue_hash_matches() {
        let issued = ResetToken::issue(&config());
        assert_eq!(ResetToken::hash(&issued.token), issued.token_hash);
        assert!(issued.expires_at > Utc::now());
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = ResetToken::issue(&config());
        let b = ResetToken::issue(&config());
        assert_ne!(a.token, b.token);
    }
}
