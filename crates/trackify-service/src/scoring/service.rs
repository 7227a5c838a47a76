//! Scoring service: per-KRA KPI scores and monthly aggregation.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use trackify_core::error::AppError;
use trackify_core::result::AppResult;
use trackify_database::repositories::{KpiRepository, KraRepository, UserRepository};
use trackify_entity::kpi::{Kpi, KpiScore, Kra};

use crate::context::RequestContext;

/// Aggregated completion for one employee in one month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReview {
    pub employee_id: Uuid,
    pub year: i32,
    pub month: u32,
    /// KPIs due in the month.
    pub kpis: Vec<Kpi>,
    /// Number of KPIs due in the month.
    pub total: usize,
    /// KPIs at 100% completion.
    pub completed: usize,
    /// Mean completion percentage, zero for an empty month.
    pub average_percentage: f64,
}

/// Handles score reads and review aggregation.
#[derive(Debug, Clone)]
pub struct ScoringService {
    kpi_repo: Arc<KpiRepository>,
    kra_repo: Arc<KraRepository>,
    user_repo: Arc<UserRepository>,
}

impl ScoringService {
    /// Creates a new scoring service.
    pub fn new(
        kpi_repo: Arc<KpiRepository>,
        kra_repo: Arc<KraRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            kpi_repo,
            kra_repo,
            user_repo,
        }
    }

    /// KPI scoring rows for one KRA.
    pub async fn kra_scores(&self, kra_id: Uuid) -> AppResult<Vec<KpiScore>> {
        self.kra_repo
            .find_by_id(kra_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("KRA {kra_id} not found")))?;

        self.kpi_repo.scores_by_kra(kra_id).await
    }

    /// The KRAs of the caller's department; empty when the caller has
    /// no department.
    pub async fn available_kras(&self, ctx: &RequestContext) -> AppResult<Vec<Kra>> {
        let user = self
            .user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        match user.dept_id {
            Some(dept_id) => self.kra_repo.list_by_department(dept_id).await,
            None => Ok(Vec::new()),
        }
    }

    /// Aggregates one employee's KPIs due in the given month.
    pub async fn monthly_review(
        &self,
        employee_id: Uuid,
        year: i32,
        month: u32,
    ) -> AppResult<MonthlyReview> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| AppError::validation(format!("Invalid month: {year}-{month}")))?;
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(|| AppError::validation(format!("Invalid month: {year}-{month}")))?;

        let kpis = self
            .kpi_repo
            .list_by_owner_due_between(employee_id, start, end)
            .await?;

        let total = kpis.len();
        let completed = kpis.iter().filter(|k| k.is_complete()).count();
        let average_percentage = if total == 0 {
            0.0
        } else {
            kpis.iter().map(|k| k.percentage as f64).sum::<f64>() / total as f64
        };

        Ok(MonthlyReview {
            employee_id,
            year,
            month,
            kpis,
            total,
            completed,
            average_percentage,
        })
    }
}
