//! Panel item model: the unified shape of everything the notification
//! panel shows.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use trackify_entity::kpi::Kpi;
use trackify_entity::notification::FeedNotification;

/// Where a panel item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A server-published feed notification.
    Feed,
    /// A locally derived due-soon KPI reminder.
    DueSoon,
}

/// One row of the notification panel.
///
/// Ids are namespaced (`feed-<uuid>` / `due-<uuid>`) so overlay state
/// for feed items and due-soon reminders can never collide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelItem {
    /// Namespaced stable identifier.
    pub id: String,
    pub kind: ItemKind,
    pub title: String,
    pub message: String,
    /// Publish time for feed items.
    pub created_at: Option<DateTime<Utc>>,
    /// Due date for due-soon items.
    pub due_date: Option<NaiveDate>,
}

impl PanelItem {
    /// Builds a panel row from a server feed notification.
    pub fn from_feed(n: &FeedNotification) -> Self {
        Self {
            id: format!("feed-{}", n.id),
            kind: ItemKind::Feed,
            title: n.title.clone(),
            message: n.message.clone(),
            created_at: Some(n.created_at),
            due_date: None,
        }
    }

    /// Builds a due-soon reminder row from a KPI.
    pub fn from_due_kpi(kpi: &Kpi, days_left: i64) -> Self {
        let when = match days_left {
            0 => "today".to_string(),
            1 => "tomorrow".to_string(),
            n => format!("in {n} days"),
        };
        Self {
            id: format!("due-{}", kpi.id),
            kind: ItemKind::DueSoon,
            title: format!("KPI due {when}"),
            message: format!("\"{}\" is at {}% and due {when}", kpi.name, kpi.percentage),
            created_at: None,
            due_date: kpi.due_date,
        }
    }

    /// The server-side notification id, for feed items only.
    pub fn feed_id(&self) -> Option<uuid::Uuid> {
        match self.kind {
            ItemKind::Feed => self.id.strip_prefix("feed-").and_then(|s| s.parse().ok()),
            ItemKind::DueSoon => None,
        }
    }
}
