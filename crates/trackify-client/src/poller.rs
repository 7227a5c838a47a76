//! Fixed-interval unread-badge poller.
//!
//! While the panel is closed the badge refreshes every ten seconds;
//! fetch failures degrade to an empty feed rather than surfacing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use trackify_core::result::AppResult;
use trackify_entity::notification::FeedNotification;

use crate::merge::badge_count;
use crate::overlay::NotificationOverlay;

/// Where the poller gets the feed from (the API client in real hosts).
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the caller's current feed.
    async fn fetch_feed(&self) -> AppResult<Vec<FeedNotification>>;
}

/// Background task keeping the unread badge fresh.
pub struct BadgePoller {
    handle: JoinHandle<()>,
    stop: watch::Sender<bool>,
    badge: watch::Receiver<usize>,
}

impl BadgePoller {
    /// Poll interval.
    pub const INTERVAL: Duration = Duration::from_secs(10);

    /// Spawns the polling task. The first poll happens immediately.
    pub fn spawn(source: Arc<dyn FeedSource>, overlay: NotificationOverlay) -> Self {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let (badge_tx, badge_rx) = watch::channel(0usize);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Self::INTERVAL);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let feed = match source.fetch_feed().await {
                            Ok(feed) => feed,
                            Err(e) => {
                                debug!(error = %e, "Feed poll failed, showing empty");
                                Vec::new()
                            }
                        };
                        if badge_tx.send(badge_count(&feed, &overlay)).is_err() {
                            break;
                        }
                    }
                    _ = stop_rx.changed() => {
                        if *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
        });

        Self {
            handle,
            stop: stop_tx,
            badge: badge_rx,
        }
    }

    /// A receiver observing the latest badge count.
    pub fn badge(&self) -> watch::Receiver<usize> {
        self.badge.clone()
    }

    /// Asks the polling task to stop.
    pub fn stop(&self) {
        let _ = self.stop.send(true);
    }
}

impl Drop for BadgePoller {
    fn drop(&mut self) {
        let _ = self.stop.send(true);
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::Utc;
    use trackify_core::error::AppError;
    use trackify_entity::user::UserRole;
    use uuid::Uuid;

    struct FixedSource {
        items: usize,
        fail: bool,
    }

    #[async_trait]
    impl FeedSource for FixedSource {
        async fn fetch_feed(&self) -> AppResult<Vec<FeedNotification>> {
            if self.fail {
                return Err(AppError::external_service("feed endpoint down"));
            }
            Ok((0..self.items)
                .map(|_| FeedNotification {
                    id: Uuid::new_v4(),
                    recipient_role: UserRole::Employee,
                    recipient_name: None,
                    title: "t".to_string(),
                    message: "m".to_string(),
                    meta: None,
                    created_at: Utc::now(),
                    deleted_at: None,
                })
                .collect())
        }
    }

    fn overlay() -> NotificationOverlay {
        NotificationOverlay::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_publishes_badge_count() {
        let poller = BadgePoller::spawn(
            Arc::new(FixedSource {
                items: 3,
                fail: false,
            }),
            overlay(),
        );
        let mut badge = poller.badge();
        badge.changed().await.unwrap();
        assert_eq!(*badge.borrow(), 3);
        poller.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_degrades_errors_to_empty() {
        let poller = BadgePoller::spawn(
            Arc::new(FixedSource {
                items: 0,
                fail: true,
            }),
            overlay(),
        );
        let mut badge = poller.badge();
        badge.changed().await.unwrap();
        assert_eq!(*badge.borrow(), 0);
        poller.stop();
    }
}
