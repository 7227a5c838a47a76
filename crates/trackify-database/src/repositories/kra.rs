//! KRA repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use trackify_core::error::{AppError, ErrorKind};
use trackify_core::result::AppResult;
use trackify_entity::kpi::Kra;

/// Repository for KRA reads.
#[derive(Debug, Clone)]
pub struct KraRepository {
    pool: PgPool,
}

impl KraRepository {
    /// Create a new KRA repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a KRA by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Kra>> {
        sqlx::query_as::<_, Kra>("SELECT * FROM kras WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find KRA", e))
    }

    /// List the KRAs of a department, newest first.
    pub async fn list_by_department(&self, dept_id: Uuid) -> AppResult<Vec<Kra>> {
        sqlx::query_as::<_, Kra>(
            "SELECT * FROM kras WHERE dept_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(dept_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list KRAs by department", e)
        })
    }
}
