//! KPI change-log repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use trackify_core::error::{AppError, ErrorKind};
use trackify_core::result::AppResult;
use trackify_entity::kpi::KpiLogView;

/// Repository for the append-only KPI change log.
#[derive(Debug, Clone)]
pub struct KpiLogRepository {
    pool: PgPool,
}

impl KpiLogRepository {
    /// Create a new change-log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Enriched entries for every KPI owned by a user, ordered by KPI
    /// then version descending so callers can group in one pass.
    pub async fn views_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<KpiLogView>> {
        sqlx::query_as::<_, KpiLogView>(
            "SELECT l.kpi_id, p.name AS kpi_name, k.name AS kra_name, d.name AS dept, \
                    p.due_date, l.version, l.updated_by_name AS updated_by, l.updated_at, \
                    l.changes \
             FROM kpi_logs l \
             JOIN kpis p ON p.id = l.kpi_id \
             JOIN kras k ON k.id = p.kra_id \
             LEFT JOIN departments d ON d.id = k.dept_id \
             WHERE p.owner_id = $1 \
             ORDER BY l.kpi_id, l.version DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load KPI log views", e)
        })
    }
}
