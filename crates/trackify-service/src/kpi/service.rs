//! KPI service: audited updates and the grouped change-history view.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use trackify_core::error::AppError;
use trackify_core::result::AppResult;
use trackify_database::repositories::{KpiLogRepository, KpiRepository};
use trackify_entity::kpi::{Kpi, KpiLogView, UpdateKpi};

use crate::context::RequestContext;

/// One KPI's change history: display fields from the newest entry plus
/// every log entry, newest version first.
#[derive(Debug, Clone, Serialize)]
pub struct KpiLogGroup {
    pub kpi_id: Uuid,
    pub kpi_name: String,
    pub kra_name: String,
    pub dept: Option<String>,
    /// The latest (maximum) version recorded for this KPI.
    pub latest_version: i32,
    pub entries: Vec<KpiLogView>,
}

/// Handles KPI mutation and history reads.
#[derive(Debug, Clone)]
pub struct KpiService {
    kpi_repo: Arc<KpiRepository>,
    log_repo: Arc<KpiLogRepository>,
}

impl KpiService {
    /// Creates a new KPI service.
    pub fn new(kpi_repo: Arc<KpiRepository>, log_repo: Arc<KpiLogRepository>) -> Self {
        Self { kpi_repo, log_repo }
    }

    /// Applies an update to a KPI, appending the versioned change-log
    /// entry. Only the owner or a manager-and-above may edit; a no-op
    /// update succeeds without logging anything.
    pub async fn update_kpi(
        &self,
        ctx: &RequestContext,
        kpi_id: Uuid,
        update: UpdateKpi,
    ) -> AppResult<Kpi> {
        if let Some(pct) = update.percentage {
            if !(0..=100).contains(&pct) {
                return Err(AppError::validation("Percentage must be between 0 and 100"));
            }
        }
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("KPI name cannot be empty"));
            }
        }

        let current = self
            .kpi_repo
            .find_by_id(kpi_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("KPI {kpi_id} not found")))?;

        if current.owner_id != ctx.user_id && !ctx.is_manager_or_above() {
            return Err(AppError::forbidden("Only the owner or a manager can edit this KPI"));
        }

        let outcome = self
            .kpi_repo
            .update_with_log(kpi_id, &update, ctx.user_id, &ctx.name)
            .await?;

        if let Some(version) = outcome.logged_version {
            info!(kpi_id = %kpi_id, version, actor = %ctx.user_id, "KPI updated");
        }

        Ok(outcome.kpi)
    }

    /// All KPIs owned by the caller, soonest due first. Feeds the
    /// client's due-soon reminder derivation.
    pub async fn kpis_for_owner(&self, ctx: &RequestContext) -> AppResult<Vec<Kpi>> {
        self.kpi_repo.list_by_owner(ctx.user_id).await
    }

    /// The caller's KPI change history, grouped per KPI.
    pub async fn logs_for_owner(&self, ctx: &RequestContext) -> AppResult<Vec<KpiLogGroup>> {
        let views = self.log_repo.views_for_owner(ctx.user_id).await?;
        Ok(group_log_views(views))
    }
}

/// Groups enriched log entries per KPI. Input must already be ordered
/// by KPI then version descending, which makes this a single pass; each
/// group's first entry is its latest version.
pub fn group_log_views(views: Vec<KpiLogView>) -> Vec<KpiLogGroup> {
    let mut groups: Vec<KpiLogGroup> = Vec::new();
    for view in views {
        match groups.last_mut() {
            Some(group) if group.kpi_id == view.kpi_id => group.entries.push(view),
            _ => groups.push(KpiLogGroup {
                kpi_id: view.kpi_id,
                kpi_name: view.kpi_name.clone(),
                kra_name: view.kra_name.clone(),
                dept: view.dept.clone(),
                latest_version: view.version,
                entries: vec![view],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn view(kpi_id: Uuid, version: i32) -> KpiLogView {
        KpiLogView {
            kpi_id,
            kpi_name: "Demos".to_string(),
            kra_name: "Growth".to_string(),
            dept: Some("Sales".to_string()),
            due_date: None,
            version,
            updated_by: "Alice".to_string(),
            updated_at: Utc::now(),
            changes: serde_json::json!({}),
        }
    }

    #[test]
    fn test_grouping_keeps_version_order_and_latest() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let groups = group_log_views(vec![view(a, 3), view(a, 2), view(a, 1), view(b, 1)]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].kpi_id, a);
        assert_eq!(groups[0].latest_version, 3);
        assert_eq!(
            groups[0].entries.iter().map(|e| e.version).collect::<Vec<_>>(),
            vec![3, 2, 1]
        );
        assert_eq!(groups[1].latest_version, 1);
    }

    #[test]
    fn test_latest_equals_max_version() {
        let a = Uuid::new_v4();
        let groups = group_log_views(vec![view(a, 5), view(a, 4), view(a, 2)]);
        let max = groups[0].entries.iter().map(|e| e.version).max();
        assert_eq!(Some(groups[0].latest_version), max);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_log_views(Vec::new()).is_empty());
    }
}
