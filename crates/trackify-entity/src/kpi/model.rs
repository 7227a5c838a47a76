//! KPI (Key Performance Indicator) entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A measurable item under a KRA, owned by an employee.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Kpi {
    /// Unique KPI identifier.
    pub id: Uuid,
    /// Parent KRA.
    pub kra_id: Uuid,
    /// KPI name.
    pub name: String,
    /// Owning employee.
    pub owner_id: Uuid,
    /// Due date (day granularity).
    pub due_date: Option<NaiveDate>,
    /// Completion percentage (0-100).
    pub percentage: i32,
    /// When the KPI was created.
    pub created_at: DateTime<Utc>,
    /// When the KPI was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Kpi {
    /// Whether the KPI is fully completed.
    pub fn is_complete(&self) -> bool {
        self.percentage >= 100
    }
}

/// Mutable KPI fields for an update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateKpi {
    /// New KPI name.
    pub name: Option<String>,
    /// New due date.
    pub due_date: Option<NaiveDate>,
    /// New completion percentage.
    pub percentage: Option<i32>,
}

impl UpdateKpi {
    /// Field-level diff against the current KPI state, recording only
    /// the fields that actually change as `{field: {"from": .., "to": ..}}`.
    /// An empty map means the update is a no-op.
    pub fn diff_against(&self, current: &Kpi) -> serde_json::Map<String, serde_json::Value> {
        let mut changes = serde_json::Map::new();
        if let Some(name) = &self.name {
            if *name != current.name {
                changes.insert(
                    "name".to_string(),
                    serde_json::json!({"from": current.name, "to": name}),
                );
            }
        }
        if let Some(due_date) = self.due_date {
            if Some(due_date) != current.due_date {
                changes.insert(
                    "due_date".to_string(),
                    serde_json::json!({"from": current.due_date, "to": due_date}),
                );
            }
        }
        if let Some(percentage) = self.percentage {
            if percentage != current.percentage {
                changes.insert(
                    "percentage".to_string(),
                    serde_json::json!({"from": current.percentage, "to": percentage}),
                );
            }
        }
        changes
    }
}

/// A KPI scoring row for a KRA, with the display fields the scoring
/// endpoints return.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct KpiScore {
    /// KPI identifier.
    pub id: Uuid,
    /// KPI name.
    pub name: String,
    /// Parent KRA.
    pub kra_id: Uuid,
    /// Parent KRA name.
    pub kra_name: String,
    /// Completion percentage.
    pub percentage: i32,
    /// Due date.
    pub due_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn kpi() -> Kpi {
        Kpi {
            id: Uuid::new_v4(),
            kra_id: Uuid::new_v4(),
            name: "Close deals".to_string(),
            owner_id: Uuid::new_v4(),
            due_date: NaiveDate::from_ymd_opt(2026, 9, 30),
            percentage: 40,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_diff_records_only_changed_fields() {
        let update = UpdateKpi {
            name: Some("Close deals".to_string()),
            due_date: None,
            percentage: Some(60),
        };
        let changes = update.diff_against(&kpi());
        assert_eq!(changes.len(), 1);
        assert_eq!(changes["percentage"]["from"], 40);
        assert_eq!(changes["percentage"]["to"], 60);
    }

    #[test]
    fn test_diff_noop_is_empty() {
        let update = UpdateKpi {
            name: Some("Close deals".to_string()),
            due_date: NaiveDate::from_ymd_opt(2026, 9, 30),
            percentage: Some(40),
        };
        assert!(update.diff_against(&kpi()).is_empty());
    }

    #[test]
    fn test_is_complete() {
        let mut k = kpi();
        assert!(!k.is_complete());
        k.percentage = 100;
        assert!(k.is_complete());
    }
}
