//! Role reference entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A role row in the name-keyed roles table.
///
/// Rows are created lazily on first reference (resolve-or-create); the
/// unique name constraint guarantees one row per name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique role identifier.
    pub id: Uuid,
    /// Role name (unique).
    pub name: String,
    /// When the role was created.
    pub created_at: DateTime<Utc>,
}
