//! Feed + due-soon merge and the unread badge.

use chrono::NaiveDate;

use trackify_entity::kpi::Kpi;
use trackify_entity::notification::FeedNotification;

use crate::items::{ItemKind, PanelItem};
use crate::overlay::NotificationOverlay;

/// Maximum rows the panel shows after filtering.
pub const PANEL_CAP: usize = 10;

/// Days ahead (inclusive) a KPI due date counts as "due soon".
pub const DUE_SOON_WINDOW_DAYS: i64 = 2;

/// Derives due-soon reminders from the caller's KPIs: incomplete and
/// due within the window (today, tomorrow, or the day after), sorted by
/// due date ascending. Overdue and completed KPIs are excluded.
pub fn due_soon_items(kpis: &[Kpi], today: NaiveDate) -> Vec<PanelItem> {
    let mut due: Vec<(NaiveDate, PanelItem)> = kpis
        .iter()
        .filter(|k| !k.is_complete())
        .filter_map(|k| {
            let date = k.due_date?;
            let days_left = (date - today).num_days();
            (0..=DUE_SOON_WINDOW_DAYS)
                .contains(&days_left)
                .then(|| (date, PanelItem::from_due_kpi(k, days_left)))
        })
        .collect();
    due.sort_by_key(|(date, _)| *date);
    due.into_iter().map(|(_, item)| item).collect()
}

/// Builds the panel: feed items (already newest-first) ahead of due-soon
/// reminders (due-date ascending), each sublist keeping its internal
/// order. Locally deleted items are dropped; once the daily clear has
/// run, read-and-unpinned items are hidden for the day; the result is
/// capped at [`PANEL_CAP`].
pub fn merge_panel(
    feed: &[FeedNotification],
    due_soon: Vec<PanelItem>,
    overlay: &NotificationOverlay,
    cleared_today: bool,
) -> Vec<PanelItem> {
    let deleted = overlay.deleted_ids();
    let read = overlay.read_ids();
    let pinned = overlay.pinned_ids();

    feed.iter()
        .map(PanelItem::from_feed)
        .chain(due_soon)
        .filter(|item| !deleted.contains(&item.id))
        .filter(|item| {
            !(cleared_today && read.contains(&item.id) && !pinned.contains(&item.id))
        })
        .take(PANEL_CAP)
        .collect()
}

/// Unread badge count: feed items not read, not pinned, and not deleted
/// on this device. Due-soon reminders never count toward the badge.
pub fn badge_count(feed: &[FeedNotification], overlay: &NotificationOverlay) -> usize {
    let deleted = overlay.deleted_ids();
    let read = overlay.read_ids();
    let pinned = overlay.pinned_ids();

    feed.iter()
        .map(PanelItem::from_feed)
        .filter(|item| item.kind == ItemKind::Feed)
        .filter(|item| {
            !read.contains(&item.id) && !pinned.contains(&item.id) && !deleted.contains(&item.id)
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::{Duration, Utc};
    use std::sync::Arc;
    use trackify_entity::user::UserRole;
    use uuid::Uuid;

    fn overlay() -> NotificationOverlay {
        NotificationOverlay::new(Arc::new(MemoryStore::new()))
    }

    fn feed_item(minutes_ago: i64) -> FeedNotification {
        FeedNotification {
            id: Uuid::new_v4(),
            recipient_role: UserRole::Employee,
            recipient_name: None,
            title: "t".to_string(),
            message: "m".to_string(),
            meta: None,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
            deleted_at: None,
        }
    }

    fn kpi(due_in_days: i64, percentage: i32, today: NaiveDate) -> Kpi {
        Kpi {
            id: Uuid::new_v4(),
            kra_id: Uuid::new_v4(),
            name: "k".to_string(),
            owner_id: Uuid::new_v4(),
            due_date: Some(today + Duration::days(due_in_days)),
            percentage,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    #[test]
    fn test_due_soon_window_filter() {
        let kpis = vec![
            kpi(3, 50, today()),  // outside the window
            kpi(0, 100, today()), // complete
            kpi(1, 50, today()),  // included
            kpi(-1, 50, today()), // overdue
            kpi(2, 99, today()),  // included
        ];
        let items = due_soon_items(&kpis, today());
        assert_eq!(items.len(), 2);
        // Sorted by due date ascending.
        assert!(items[0].due_date < items[1].due_date);
    }

    #[test]
    fn test_merge_is_feed_then_due_soon_order_preserved() {
        let feed = vec![feed_item(1), feed_item(5), feed_item(10)];
        let due = due_soon_items(&[kpi(0, 10, today()), kpi(2, 20, today())], today());
        let merged = merge_panel(&feed, due.clone(), &overlay(), false);

        assert_eq!(merged.len(), 5);
        let feed_ids: Vec<_> = feed
            .iter()
            .map(|n| format!("feed-{}", n.id))
            .collect();
        assert_eq!(
            merged[..3].iter().map(|i| i.id.clone()).collect::<Vec<_>>(),
            feed_ids
        );
        assert_eq!(
            merged[3..].iter().map(|i| i.id.clone()).collect::<Vec<_>>(),
            due.iter().map(|i| i.id.clone()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_merge_filters_deleted_and_caps() {
        let feed: Vec<_> = (0..12).map(feed_item).collect();
        let o = overlay();
        o.delete(&format!("feed-{}", feed[0].id));

        let merged = merge_panel(&feed, Vec::new(), &o, false);
        assert_eq!(merged.len(), PANEL_CAP);
        assert!(merged.iter().all(|i| i.id != format!("feed-{}", feed[0].id)));
    }

    #[test]
    fn test_daily_clear_hides_read_unpinned_only() {
        let feed = vec![feed_item(1), feed_item(2), feed_item(3)];
        let o = overlay();
        let read_unpinned = format!("feed-{}", feed[0].id);
        let read_pinned = format!("feed-{}", feed[1].id);
        o.mark_read(&read_unpinned);
        o.mark_read(&read_pinned);
        o.toggle_pin(&read_pinned);

        let merged = merge_panel(&feed, Vec::new(), &o, true);
        let ids: Vec<_> = merged.iter().map(|i| i.id.clone()).collect();
        assert!(!ids.contains(&read_unpinned));
        assert!(ids.contains(&read_pinned));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_badge_counts_unread_feed_only() {
        let feed = vec![feed_item(1), feed_item(2), feed_item(3)];
        let o = overlay();
        assert_eq!(badge_count(&feed, &o), 3);

        o.mark_read(&format!("feed-{}", feed[0].id));
        o.toggle_pin(&format!("feed-{}", feed[1].id));
        assert_eq!(badge_count(&feed, &o), 1);

        // Idempotent re-read does not change the count.
        o.mark_read(&format!("feed-{}", feed[0].id));
        assert_eq!(badge_count(&feed, &o), 1);
    }
}
