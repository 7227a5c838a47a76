//! Local overlay state for the notification panel.
//!
//! Read/pinned/deleted marks live only in the host's key-value store
//! (browser local storage), never on the server, so they are per-device
//! by design. Id sets are persisted as JSON string arrays.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::store::KeyValueStore;

const READ_KEY: &str = "notif_read_ids";
const PINNED_KEY: &str = "notif_pinned_ids";
const DELETED_KEY: &str = "notif_deleted_ids";
const LAST_CLEAR_KEY: &str = "notif_last_clear_ts";
const POPUP_SHOWN_KEY: &str = "notif_popup_shown";

const LAST_CLEAR_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Hour of day (local) at which the daily clear becomes due.
const DAILY_CLEAR_HOUR: u32 = 6;

/// Per-device overlay over the notification feed.
#[derive(Clone)]
pub struct NotificationOverlay {
    store: Arc<dyn KeyValueStore>,
}

impl NotificationOverlay {
    /// Creates an overlay over the given store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn id_set(&self, key: &str) -> BTreeSet<String> {
        self.store
            .get(key)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn save_id_set(&self, key: &str, set: &BTreeSet<String>) {
        if let Ok(raw) = serde_json::to_string(set) {
            self.store.set(key, &raw);
        }
    }

    /// Ids marked read on this device.
    pub fn read_ids(&self) -> BTreeSet<String> {
        self.id_set(READ_KEY)
    }

    /// Ids pinned on this device.
    pub fn pinned_ids(&self) -> BTreeSet<String> {
        self.id_set(PINNED_KEY)
    }

    /// Ids deleted on this device.
    pub fn deleted_ids(&self) -> BTreeSet<String> {
        self.id_set(DELETED_KEY)
    }

    /// Marks an item read. Set semantics: marking twice is the same as
    /// marking once.
    pub fn mark_read(&self, id: &str) {
        let mut set = self.id_set(READ_KEY);
        if set.insert(id.to_string()) {
            self.save_id_set(READ_KEY, &set);
        }
    }

    /// Toggles an item's pinned state, returning the new state.
    pub fn toggle_pin(&self, id: &str) -> bool {
        let mut set = self.id_set(PINNED_KEY);
        let pinned = if set.remove(id) {
            false
        } else {
            set.insert(id.to_string());
            true
        };
        self.save_id_set(PINNED_KEY, &set);
        pinned
    }

    /// Hides an item on this device.
    pub fn delete(&self, id: &str) {
        let mut set = self.id_set(DELETED_KEY);
        if set.insert(id.to_string()) {
            self.save_id_set(DELETED_KEY, &set);
        }
    }

    /// Runs the daily clear if it is due: the first check at or after
    /// 06:00 local whose recorded last clear precedes today's 06:00.
    /// Returns whether the clear ran on this call. The clear is purely
    /// a display rule recorded as a timestamp; nothing is deleted.
    pub fn run_daily_clear_if_due(&self, now: NaiveDateTime) -> bool {
        let Some(threshold) = today_clear_threshold(now) else {
            return false;
        };
        if now < threshold {
            return false;
        }
        if self.last_clear().is_some_and(|last| last >= threshold) {
            return false;
        }
        self.store
            .set(LAST_CLEAR_KEY, &now.format(LAST_CLEAR_FORMAT).to_string());
        debug!("Daily notification clear recorded");
        true
    }

    /// Whether the daily clear has already run for the current cycle.
    pub fn cleared_today(&self, now: NaiveDateTime) -> bool {
        match (self.last_clear(), today_clear_threshold(now)) {
            (Some(last), Some(threshold)) => now >= threshold && last >= threshold,
            _ => false,
        }
    }

    fn last_clear(&self) -> Option<NaiveDateTime> {
        self.store
            .get(LAST_CLEAR_KEY)
            .and_then(|raw| NaiveDateTime::parse_from_str(&raw, LAST_CLEAR_FORMAT).ok())
    }

    /// One-shot popup gate: true on the first call, false afterwards.
    pub fn take_popup_slot(&self) -> bool {
        if self.store.get(POPUP_SHOWN_KEY).is_some() {
            return false;
        }
        self.store.set(POPUP_SHOWN_KEY, "1");
        true
    }
}

fn today_clear_threshold(now: NaiveDateTime) -> Option<NaiveDateTime> {
    NaiveTime::from_hms_opt(DAILY_CLEAR_HOUR, 0, 0).map(|t| now.date().and_time(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn overlay() -> NotificationOverlay {
        NotificationOverlay::new(Arc::new(MemoryStore::new()))
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_mark_read_is_idempotent() {
        let o = overlay();
        o.mark_read("feed-1");
        o.mark_read("feed-1");
        o.mark_read("feed-2");
        assert_eq!(o.read_ids().len(), 2);
    }

    #[test]
    fn test_toggle_pin_round_trip() {
        let o = overlay();
        assert!(o.toggle_pin("feed-1"));
        assert!(o.pinned_ids().contains("feed-1"));
        assert!(!o.toggle_pin("feed-1"));
        assert!(o.pinned_ids().is_empty());
    }

    #[test]
    fn test_daily_clear_runs_once_per_day() {
        let o = overlay();
        assert!(!o.run_daily_clear_if_due(at(10, 5, 59)));
        assert!(o.run_daily_clear_if_due(at(10, 6, 0)));
        assert!(!o.run_daily_clear_if_due(at(10, 9, 30)));
        assert!(o.cleared_today(at(10, 9, 30)));
        // Next day, a fresh cycle.
        assert!(!o.cleared_today(at(11, 7, 0)));
        assert!(o.run_daily_clear_if_due(at(11, 7, 0)));
    }

    #[test]
    fn test_popup_slot_is_one_shot() {
        let o = overlay();
        assert!(o.take_popup_slot());
        assert!(!o.take_popup_slot());
    }
}
