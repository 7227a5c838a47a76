//! KRA (Key Result Area) entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A goal record scoped to a department, with a numeric target.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Kra {
    /// Unique KRA identifier.
    pub id: Uuid,
    /// KRA name.
    pub name: String,
    /// Owning department.
    pub dept_id: Uuid,
    /// Numeric target for the goal.
    pub target: i32,
    /// When the KRA was created.
    pub created_at: DateTime<Utc>,
}
