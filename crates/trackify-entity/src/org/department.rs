//! Department reference entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A department row in the name-keyed departments table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Department {
    /// Unique department identifier.
    pub id: Uuid,
    /// Department name (unique).
    pub name: String,
    /// When the department was created.
    pub created_at: DateTime<Utc>,
}
