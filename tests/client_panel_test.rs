//! End-to-end notification panel behavior: server feed items merged
//! with locally derived due-soon reminders, per-device overlay state,
//! and the background badge poller.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use trackify_client::items::PanelItem;
use trackify_client::merge::{badge_count, due_soon_items, merge_panel};
use trackify_client::overlay::NotificationOverlay;
use trackify_client::poller::{BadgePoller, FeedSource};
use trackify_client::store::MemoryStore;
use trackify_core::result::AppResult;
use trackify_entity::kpi::Kpi;
use trackify_entity::notification::FeedNotification;
use trackify_entity::user::UserRole;

fn feed_item(minutes_ago: i64) -> FeedNotification {
    FeedNotification {
        id: Uuid::new_v4(),
        recipient_role: UserRole::Employee,
        recipient_name: None,
        title: "Request Approved".to_string(),
        message: "Your KPI change request was Approved".to_string(),
        meta: None,
        created_at: Utc::now() - Duration::minutes(minutes_ago),
        deleted_at: None,
    }
}

fn kpi(name: &str, due_in_days: i64, percentage: i32, today: NaiveDate) -> Kpi {
    Kpi {
        id: Uuid::new_v4(),
        kra_id: Uuid::new_v4(),
        name: name.to_string(),
        owner_id: Uuid::new_v4(),
        due_date: Some(today + Duration::days(due_in_days)),
        percentage,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn test_panel_reflects_overlay_actions() {
    let today = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
    let overlay = NotificationOverlay::new(Arc::new(MemoryStore::new()));

    let feed = vec![feed_item(1), feed_item(2)];
    let kpis = vec![kpi("Close deals", 1, 40, today), kpi("Ship report", 0, 100, today)];

    let due = due_soon_items(&kpis, today);
    // The completed KPI produces no reminder.
    assert_eq!(due.len(), 1);

    let panel = merge_panel(&feed, due.clone(), &overlay, false);
    assert_eq!(panel.len(), 3);
    assert_eq!(badge_count(&feed, &overlay), 2);

    // Reading a feed item drops it from the badge but not the panel.
    overlay.mark_read(&panel[0].id);
    assert_eq!(badge_count(&feed, &overlay), 1);
    assert_eq!(merge_panel(&feed, due.clone(), &overlay, false).len(), 3);

    // Deleting hides it everywhere on this device; the server-side
    // delete targets the original notification id.
    assert_eq!(panel[0].feed_id(), Some(feed[0].id));
    overlay.delete(&panel[0].id);
    assert_eq!(badge_count(&feed, &overlay), 1);
    assert_eq!(merge_panel(&feed, due, &overlay, false).len(), 2);
}

#[test]
fn test_daily_clear_keeps_pinned_items() {
    let today = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
    let overlay = NotificationOverlay::new(Arc::new(MemoryStore::new()));
    let feed = vec![feed_item(10), feed_item(20)];

    let pinned = PanelItem::from_feed(&feed[0]).id;
    let read = PanelItem::from_feed(&feed[1]).id;
    overlay.mark_read(&pinned);
    overlay.toggle_pin(&pinned);
    overlay.mark_read(&read);

    let after_clear = today.and_hms_opt(6, 30, 0).unwrap();
    assert!(overlay.run_daily_clear_if_due(after_clear));

    let panel = merge_panel(&feed, Vec::new(), &overlay, overlay.cleared_today(after_clear));
    assert_eq!(panel.len(), 1);
    assert_eq!(panel[0].id, pinned);
}

struct CountingSource {
    polls: AtomicUsize,
}

#[async_trait]
impl FeedSource for CountingSource {
    async fn fetch_feed(&self) -> AppResult<Vec<FeedNotification>> {
        let n = self.polls.fetch_add(1, Ordering::SeqCst);
        // The feed grows by one item per poll.
        Ok((0..=n).map(|i| feed_item(i as i64)).collect())
    }
}

#[tokio::test(start_paused = true)]
async fn test_poller_tracks_feed_growth() {
    let source = Arc::new(CountingSource {
        polls: AtomicUsize::new(0),
    });
    let overlay = NotificationOverlay::new(Arc::new(MemoryStore::new()));
    let poller = BadgePoller::spawn(source, overlay);

    let mut badge = poller.badge();
    badge.changed().await.unwrap();
    assert_eq!(*badge.borrow(), 1);

    tokio::time::advance(BadgePoller::INTERVAL).await;
    badge.changed().await.unwrap();
    assert_eq!(*badge.borrow(), 2);

    poller.stop();
}
