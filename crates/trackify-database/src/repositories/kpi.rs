//! KPI repository implementation.
//!
//! KPI mutation and change-log append happen in one transaction. The
//! `SELECT .. FOR UPDATE` on the KPI row serializes concurrent edits of
//! the same KPI, so per-KPI log versions come out strictly increasing
//! and gapless.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use trackify_core::error::{AppError, ErrorKind};
use trackify_core::result::AppResult;
use trackify_entity::kpi::{Kpi, KpiScore, UpdateKpi};

/// Outcome of a KPI update: the row after the update plus the appended
/// log version, or `None` when the update was a no-op.
#[derive(Debug, Clone)]
pub struct KpiUpdateOutcome {
    /// The KPI after the update.
    pub kpi: Kpi,
    /// The log version appended for this edit; `None` for a no-op.
    pub logged_version: Option<i32>,
}

/// Repository for KPI reads and audited mutation.
#[derive(Debug, Clone)]
pub struct KpiRepository {
    pool: PgPool,
}

impl KpiRepository {
    /// Create a new KPI repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a KPI by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Kpi>> {
        sqlx::query_as::<_, Kpi>("SELECT * FROM kpis WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find KPI", e))
    }

    /// Apply an update to a KPI and append the versioned change-log
    /// entry in the same transaction. A no-op update (no field actually
    /// changes) appends nothing.
    pub async fn update_with_log(
        &self,
        id: Uuid,
        update: &UpdateKpi,
        actor_id: Uuid,
        actor_name: &str,
    ) -> AppResult<KpiUpdateOutcome> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let current = sqlx::query_as::<_, Kpi>("SELECT * FROM kpis WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to lock KPI for update", e)
            })?
            .ok_or_else(|| AppError::not_found(format!("KPI {id} not found")))?;

        let changes = update.diff_against(&current);
        if changes.is_empty() {
            tx.rollback().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to release KPI lock", e)
            })?;
            return Ok(KpiUpdateOutcome {
                kpi: current,
                logged_version: None,
            });
        }

        let updated = sqlx::query_as::<_, Kpi>(
            "UPDATE kpis SET name = COALESCE($2, name), \
                             due_date = COALESCE($3, due_date), \
                             percentage = COALESCE($4, percentage), \
                             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&update.name)
        .bind(update.due_date)
        .bind(update.percentage)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update KPI", e))?;

        let version: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(version), 0) + 1 FROM kpi_logs WHERE kpi_id = $1",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to compute next log version", e)
        })?;

        sqlx::query(
            "INSERT INTO kpi_logs (kpi_id, version, updated_by, updated_by_name, changes) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(version)
        .bind(actor_id)
        .bind(actor_name)
        .bind(serde_json::Value::Object(changes))
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to append change log", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit KPI update", e)
        })?;

        Ok(KpiUpdateOutcome {
            kpi: updated,
            logged_version: Some(version),
        })
    }

    /// KPI scoring rows for a KRA.
    pub async fn scores_by_kra(&self, kra_id: Uuid) -> AppResult<Vec<KpiScore>> {
        sqlx::query_as::<_, KpiScore>(
            "SELECT p.id, p.name, p.kra_id, k.name AS kra_name, p.percentage, p.due_date \
             FROM kpis p JOIN kras k ON k.id = p.kra_id \
             WHERE p.kra_id = $1 ORDER BY p.created_at ASC",
        )
        .bind(kra_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load KRA scores", e))
    }

    /// KPIs owned by a user with a due date inside `[start, end)`.
    pub async fn list_by_owner_due_between(
        &self,
        owner_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<Kpi>> {
        sqlx::query_as::<_, Kpi>(
            "SELECT * FROM kpis \
             WHERE owner_id = $1 AND due_date >= $2 AND due_date < $3 \
             ORDER BY due_date ASC, id ASC",
        )
        .bind(owner_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list KPIs for the month", e)
        })
    }

    /// All KPIs owned by a user, soonest due first.
    pub async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Kpi>> {
        sqlx::query_as::<_, Kpi>(
            "SELECT * FROM kpis WHERE owner_id = $1 ORDER BY due_date ASC NULLS LAST, id ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list owned KPIs", e))
    }
}
