//! Password-reset token repository implementation.
//!
//! Tokens are stored hashed; the plaintext token only ever travels in
//! the reset email.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use trackify_core::error::{AppError, ErrorKind};
use trackify_core::result::AppResult;

/// Repository for single-use password-reset tokens.
#[derive(Debug, Clone)]
pub struct PasswordResetRepository {
    pool: PgPool,
}

impl PasswordResetRepository {
    /// Create a new password-reset repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a hashed reset token for a user.
    pub async fn create(
        &self,
        token_hash: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO password_resets (token_hash, user_id, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(token_hash)
        .bind(user_id)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to store reset token", e)
        })?;
        Ok(())
    }

    /// Consume a token: marks it used and returns the owning user, or
    /// `None` when the token is unknown, already used, or expired. The
    /// conditional UPDATE makes the token single-use under concurrency.
    pub async fn consume(&self, token_hash: &str) -> AppResult<Option<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "UPDATE password_resets SET used = TRUE \
             WHERE token_hash = $1 AND used = FALSE AND expires_at > NOW() \
             RETURNING user_id",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to consume reset token", e)
        })
    }
}
