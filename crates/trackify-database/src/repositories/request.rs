//! Change-request repository implementation.
//!
//! Decisions are a conditional UPDATE guarded on `status = 'pending'`,
//! so a request that has already reached a terminal state can never be
//! re-decided, regardless of interleaving.

use sqlx::PgPool;
use uuid::Uuid;

use trackify_core::error::{AppError, ErrorKind};
use trackify_core::result::AppResult;
use trackify_entity::request::{
    ChangeRequest, CreateChangeRequest, RequestStatus, RequestSummary, RequestTarget,
};

const SUMMARY_SELECT: &str = "SELECT r.id, r.target, r.kpi_id, r.kra_id, \
         p.name AS kpi_name, k.name AS kra_name, \
         r.requester_id, r.requester_role, r.requester_name, r.requester_dept, \
         r.requested_changes, r.request_comment, r.status, \
         r.decided_by, u.name AS decided_by_name, r.decision_comment, r.decided_at, \
         r.created_at \
     FROM change_requests r \
     LEFT JOIN kpis p ON p.id = r.kpi_id \
     LEFT JOIN kras k ON k.id = r.kra_id \
     LEFT JOIN users u ON u.id = r.decided_by";

/// Repository for change-request persistence and the decision guard.
#[derive(Debug, Clone)]
pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    /// Create a new request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new pending request.
    pub async fn create(&self, data: &CreateChangeRequest) -> AppResult<ChangeRequest> {
        sqlx::query_as::<_, ChangeRequest>(
            "INSERT INTO change_requests \
             (target, kpi_id, kra_id, requester_id, requester_role, requester_name, \
              requester_dept, requested_changes, request_comment, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'pending') \
             RETURNING *",
        )
        .bind(data.target)
        .bind(data.kpi_id)
        .bind(data.kra_id)
        .bind(data.requester_id)
        .bind(data.requester_role)
        .bind(&data.requester_name)
        .bind(&data.requester_dept)
        .bind(&data.requested_changes)
        .bind(&data.request_comment)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create request", e))
    }

    /// Find a request by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ChangeRequest>> {
        sqlx::query_as::<_, ChangeRequest>("SELECT * FROM change_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find request", e))
    }

    /// Find a request with its joined display fields.
    pub async fn find_summary(&self, id: Uuid) -> AppResult<Option<RequestSummary>> {
        sqlx::query_as::<_, RequestSummary>(&format!("{SUMMARY_SELECT} WHERE r.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load request detail", e)
            })
    }

    /// Requests authored by one user, optionally filtered by status.
    pub async fn list_for_requester(
        &self,
        target: RequestTarget,
        requester_id: Uuid,
        status: Option<RequestStatus>,
    ) -> AppResult<Vec<RequestSummary>> {
        sqlx::query_as::<_, RequestSummary>(&format!(
            "{SUMMARY_SELECT} \
             WHERE r.target = $1 AND r.requester_id = $2 \
               AND ($3::request_status IS NULL OR r.status = $3) \
             ORDER BY r.created_at DESC, r.id DESC"
        ))
        .bind(target)
        .bind(requester_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list own requests", e))
    }

    /// KPI requests from one department, excluding a requester (the
    /// manager's inbox).
    pub async fn list_for_department(
        &self,
        dept: &str,
        exclude_requester: Uuid,
        status: Option<RequestStatus>,
    ) -> AppResult<Vec<RequestSummary>> {
        sqlx::query_as::<_, RequestSummary>(&format!(
            "{SUMMARY_SELECT} \
             WHERE r.target = 'kpi' AND r.requester_dept = $1 AND r.requester_id <> $2 \
               AND ($3::request_status IS NULL OR r.status = $3) \
             ORDER BY r.created_at DESC, r.id DESC"
        ))
        .bind(dept)
        .bind(exclude_requester)
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list department requests", e)
        })
    }

    /// All requests for a target kind (the admin's inbox).
    pub async fn list_all(
        &self,
        target: RequestTarget,
        status: Option<RequestStatus>,
    ) -> AppResult<Vec<RequestSummary>> {
        sqlx::query_as::<_, RequestSummary>(&format!(
            "{SUMMARY_SELECT} \
             WHERE r.target = $1 AND ($2::request_status IS NULL OR r.status = $2) \
             ORDER BY r.created_at DESC, r.id DESC"
        ))
        .bind(target)
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list requests", e))
    }

    /// Transition a pending request into a terminal state.
    ///
    /// Returns `None` when the request is missing or no longer pending;
    /// the caller decides between not-found and conflict.
    pub async fn decide(
        &self,
        id: Uuid,
        status: RequestStatus,
        decided_by: Uuid,
        comment: Option<&str>,
    ) -> AppResult<Option<ChangeRequest>> {
        sqlx::query_as::<_, ChangeRequest>(
            "UPDATE change_requests \
             SET status = $2, decided_by = $3, decision_comment = $4, decided_at = NOW() \
             WHERE id = $1 AND status = 'pending' \
             RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(decided_by)
        .bind(comment)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to decide request", e))
    }
}
