//! Feed notification repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use trackify_core::error::{AppError, ErrorKind};
use trackify_core::result::AppResult;
use trackify_entity::notification::{CreateFeedNotification, FeedNotification};
use trackify_entity::user::UserRole;

/// Repository for server-published feed notifications.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Publish a feed notification.
    pub async fn create(&self, data: &CreateFeedNotification) -> AppResult<FeedNotification> {
        sqlx::query_as::<_, FeedNotification>(
            "INSERT INTO feed_notifications (recipient_role, recipient_name, title, message, meta) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(data.recipient_role)
        .bind(&data.recipient_name)
        .bind(&data.title)
        .bind(&data.message)
        .bind(&data.meta)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create notification", e)
        })
    }

    /// The non-deleted feed for a role, limited to items addressed to
    /// the whole role or to this recipient by name. Newest first.
    pub async fn feed(&self, role: UserRole, name: &str) -> AppResult<Vec<FeedNotification>> {
        sqlx::query_as::<_, FeedNotification>(
            "SELECT * FROM feed_notifications \
             WHERE deleted_at IS NULL AND recipient_role = $1 \
               AND (recipient_name IS NULL OR LOWER(recipient_name) = LOWER($2)) \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(role)
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load feed", e))
    }

    /// Soft-delete a feed item. Idempotent; returns whether this call
    /// performed the delete.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE feed_notifications SET deleted_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete notification", e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
