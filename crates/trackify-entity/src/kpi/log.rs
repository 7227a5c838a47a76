//! Append-only KPI change-log entities.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A change-log entry enriched with the KPI/KRA display fields the log
/// pages render.
///
/// Versions are assigned `max(version) + 1` per KPI in the same
/// transaction as the edit, so the sequence is strictly increasing and
/// gapless. Entries are never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct KpiLogView {
    /// The edited KPI.
    pub kpi_id: Uuid,
    /// KPI name.
    pub kpi_name: String,
    /// Parent KRA name.
    pub kra_name: String,
    /// Department name.
    pub dept: Option<String>,
    /// KPI due date.
    pub due_date: Option<NaiveDate>,
    /// Entry version.
    pub version: i32,
    /// Actor name.
    pub updated_by: String,
    /// When the edit happened.
    pub updated_at: DateTime<Utc>,
    /// Field-level diff.
    pub changes: serde_json::Value,
}
