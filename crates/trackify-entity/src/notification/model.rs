//! Feed notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::UserRole;

/// A server-published feed event, addressed to a role or to a named
/// recipient within that role.
///
/// Deletion is soft: a `deleted_at` timestamp hides the row from the
/// feed without losing it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FeedNotification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// Role the notification is addressed to.
    pub recipient_role: UserRole,
    /// Specific recipient name within the role, or `None` for the
    /// whole role.
    pub recipient_name: Option<String>,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Optional structured payload (e.g. the request id the event
    /// refers to).
    pub meta: Option<serde_json::Value>,
    /// When the event was published.
    pub created_at: DateTime<Utc>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Fields needed to publish a new feed notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFeedNotification {
    pub recipient_role: UserRole,
    pub recipient_name: Option<String>,
    pub title: String,
    pub message: String,
    pub meta: Option<serde_json::Value>,
}
