//! Notification feed service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use trackify_core::result::AppResult;
use trackify_database::repositories::NotificationRepository;
use trackify_entity::notification::FeedNotification;

use crate::context::RequestContext;

/// Handles the role/name-scoped notification feed.
#[derive(Debug, Clone)]
pub struct FeedService {
    notification_repo: Arc<NotificationRepository>,
}

impl FeedService {
    /// Creates a new feed service.
    pub fn new(notification_repo: Arc<NotificationRepository>) -> Self {
        Self { notification_repo }
    }

    /// The caller's feed: items addressed to their role, either for the
    /// whole role or for them by name. Newest first.
    pub async fn feed(&self, ctx: &RequestContext) -> AppResult<Vec<FeedNotification>> {
        self.notification_repo.feed(ctx.role, &ctx.name).await
    }

    /// Soft-delete a feed item. Deleting an already-deleted or unknown
    /// item succeeds quietly; the client treats server delete as
    /// best-effort.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let deleted = self.notification_repo.soft_delete(id).await?;
        if deleted {
            info!(notification_id = %id, "Feed item deleted");
        }
        Ok(())
    }
}
