//! Request workflow service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use trackify_core::error::AppError;
use trackify_core::result::AppResult;
use trackify_database::repositories::{
    KpiRepository, NotificationRepository, RequestRepository, UserRepository,
};
use trackify_entity::notification::CreateFeedNotification;
use trackify_entity::request::{
    ChangeRequest, CreateChangeRequest, RequestStatus, RequestSummary, RequestTarget,
};
use trackify_entity::user::{User, UserRole};

use crate::context::RequestContext;
use crate::request::authorize::{Decider, can_decide};

/// Which slice of requests a listing call asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestScope {
    /// Requests the caller authored.
    Mine,
    /// Requests awaiting the caller's decision.
    Inbox,
}

/// Submission input. The change payload is kept verbatim; it is not
/// validated as JSON at write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub target: RequestTarget,
    pub kpi_id: Option<Uuid>,
    pub kra_id: Option<Uuid>,
    pub requested_changes: String,
    pub comment: Option<String>,
}

/// Full request detail: the joined record plus the best-effort parsed
/// change payload (`None` when the stored text is not valid JSON).
#[derive(Debug, Clone, Serialize)]
pub struct RequestDetail {
    #[serde(flatten)]
    pub summary: RequestSummary,
    pub parsed_changes: Option<serde_json::Value>,
}

/// Handles the change-request workflow.
#[derive(Debug, Clone)]
pub struct RequestService {
    request_repo: Arc<RequestRepository>,
    user_repo: Arc<UserRepository>,
    kpi_repo: Arc<KpiRepository>,
    notification_repo: Arc<NotificationRepository>,
}

impl RequestService {
    /// Creates a new request service.
    pub fn new(
        request_repo: Arc<RequestRepository>,
        user_repo: Arc<UserRepository>,
        kpi_repo: Arc<KpiRepository>,
        notification_repo: Arc<NotificationRepository>,
    ) -> Self {
        Self {
            request_repo,
            user_repo,
            kpi_repo,
            notification_repo,
        }
    }

    async fn caller(&self, ctx: &RequestContext) -> AppResult<User> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Submits a new pending request. KRA requests are reserved for
    /// managers and above.
    pub async fn submit(
        &self,
        ctx: &RequestContext,
        req: SubmitRequest,
    ) -> AppResult<ChangeRequest> {
        if req.target == RequestTarget::Kra && !ctx.is_manager_or_above() {
            return Err(AppError::forbidden(
                "Only managers and above may request KRA changes",
            ));
        }

        let requester = self.caller(ctx).await?;

        // Resolve the KRA the request hangs under: for KPI requests it
        // comes from the targeted KPI when not supplied explicitly.
        let (kpi_id, kra_id) = match req.target {
            RequestTarget::Kpi => {
                let kpi_id = req
                    .kpi_id
                    .ok_or_else(|| AppError::validation("kpi_id is required for KPI requests"))?;
                let kra_id = match req.kra_id {
                    Some(id) => id,
                    None => {
                        self.kpi_repo
                            .find_by_id(kpi_id)
                            .await?
                            .ok_or_else(|| {
                                AppError::not_found(format!("KPI {kpi_id} not found"))
                            })?
                            .kra_id
                    }
                };
                (Some(kpi_id), kra_id)
            }
            RequestTarget::Kra => {
                let kra_id = req
                    .kra_id
                    .ok_or_else(|| AppError::validation("kra_id is required for KRA requests"))?;
                (None, kra_id)
            }
        };

        let created = self
            .request_repo
            .create(&CreateChangeRequest {
                target: req.target,
                kpi_id,
                kra_id,
                requester_id: requester.id,
                requester_role: requester.role,
                requester_name: requester.name.clone(),
                requester_dept: requester.dept.clone(),
                requested_changes: req.requested_changes,
                request_comment: req.comment,
            })
            .await?;

        info!(request_id = %created.id, target = %created.target, requester = %requester.id, "Request submitted");

        // Tell the deciding side something new arrived. Feed publishing
        // is best-effort; a failure never fails the submit.
        let recipient_role = match req.target {
            RequestTarget::Kra => UserRole::Admin,
            RequestTarget::Kpi => UserRole::Manager,
        };
        let _ = self
            .notification_repo
            .create(&CreateFeedNotification {
                recipient_role,
                recipient_name: None,
                title: format!("New {} change request", created.target),
                message: format!("{} submitted a change request", requester.name),
                meta: Some(serde_json::json!({ "request_id": created.id })),
            })
            .await;

        Ok(created)
    }

    /// Lists requests for the caller: their own submissions, or the
    /// inbox of requests awaiting their decision.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        target: RequestTarget,
        status: Option<RequestStatus>,
        scope: RequestScope,
    ) -> AppResult<Vec<RequestSummary>> {
        match scope {
            RequestScope::Mine => {
                self.request_repo
                    .list_for_requester(target, ctx.user_id, status)
                    .await
            }
            RequestScope::Inbox => match ctx.role {
                UserRole::Admin => self.request_repo.list_all(target, status).await,
                UserRole::Manager => {
                    if target != RequestTarget::Kpi {
                        return Ok(Vec::new());
                    }
                    let caller = self.caller(ctx).await?;
                    match caller.dept {
                        Some(dept) => {
                            self.request_repo
                                .list_for_department(&dept, ctx.user_id, status)
                                .await
                        }
                        None => Ok(Vec::new()),
                    }
                }
                UserRole::Employee => Ok(Vec::new()),
            },
        }
    }

    /// Full detail for one request, visible to its requester and to
    /// anyone authorized to decide it. The caller names the target kind
    /// it expects; a request of the other kind reads as not found, so
    /// the KPI and KRA route families never leak into each other.
    pub async fn detail(
        &self,
        ctx: &RequestContext,
        target: RequestTarget,
        id: Uuid,
    ) -> AppResult<RequestDetail> {
        let summary = self
            .request_repo
            .find_summary(id)
            .await?
            .filter(|s| s.target == target)
            .ok_or_else(|| AppError::not_found(format!("Request {id} not found")))?;

        if summary.requester_id != ctx.user_id {
            let caller = self.caller(ctx).await?;
            let decider = Decider {
                user_id: caller.id,
                role: caller.role,
                dept: caller.dept.as_deref(),
            };
            if !can_decide(
                &decider,
                summary.target,
                summary.requester_id,
                summary.requester_dept.as_deref(),
            ) {
                return Err(AppError::forbidden("Not allowed to view this request"));
            }
        }

        let parsed_changes = summary.parsed_changes();
        Ok(RequestDetail {
            summary,
            parsed_changes,
        })
    }

    /// Approves a pending request.
    pub async fn approve(
        &self,
        ctx: &RequestContext,
        target: RequestTarget,
        id: Uuid,
    ) -> AppResult<ChangeRequest> {
        self.decide(ctx, target, id, RequestStatus::Approved, None)
            .await
    }

    /// Rejects a pending request; the comment is mandatory.
    pub async fn reject(
        &self,
        ctx: &RequestContext,
        target: RequestTarget,
        id: Uuid,
        comment: &str,
    ) -> AppResult<ChangeRequest> {
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(AppError::validation("A comment is required to reject"));
        }
        self.decide(ctx, target, id, RequestStatus::Rejected, Some(comment))
            .await
    }

    async fn decide(
        &self,
        ctx: &RequestContext,
        target: RequestTarget,
        id: Uuid,
        status: RequestStatus,
        comment: Option<&str>,
    ) -> AppResult<ChangeRequest> {
        let request = self
            .request_repo
            .find_by_id(id)
            .await?
            .filter(|r| r.target == target)
            .ok_or_else(|| AppError::not_found(format!("Request {id} not found")))?;

        if !request.status.can_transition_to(status) {
            return Err(AppError::conflict(format!(
                "Request {id} has already been decided ({})",
                request.status
            )));
        }

        let caller = self.caller(ctx).await?;
        let decider = Decider {
            user_id: caller.id,
            role: caller.role,
            dept: caller.dept.as_deref(),
        };
        if !can_decide(
            &decider,
            request.target,
            request.requester_id,
            request.requester_dept.as_deref(),
        ) {
            return Err(AppError::forbidden("Not authorized to decide this request"));
        }

        // A concurrent decision can still win between the read above and
        // this update; its status is unknown here, so the message names
        // none.
        let decided = self
            .request_repo
            .decide(id, status, ctx.user_id, comment)
            .await?
            .ok_or_else(|| {
                AppError::conflict(format!("Request {id} has already been decided"))
            })?;

        info!(request_id = %id, status = %decided.status, decided_by = %ctx.user_id, "Request decided");

        // Best-effort: let the requester know the outcome by name.
        let _ = self
            .notification_repo
            .create(&CreateFeedNotification {
                recipient_role: decided.requester_role,
                recipient_name: Some(decided.requester_name.clone()),
                title: format!("Request {}", decided.status),
                message: match &decided.decision_comment {
                    Some(c) => format!("Your {} change request was {}: {}", decided.target, decided.status, c),
                    None => format!("Your {} change request was {}", decided.target, decided.status),
                },
                meta: Some(serde_json::json!({ "request_id": decided.id })),
            })
            .await;

        Ok(decided)
    }
}
