//! Change-request workflow handlers.
//!
//! KPI requests live under `/requests`, KRA requests under
//! `/requests/kra`; both route into the same service with the target
//! fixed by the route.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use trackify_entity::request::{ChangeRequest, RequestSummary, RequestTarget};
use trackify_service::request::service::{RequestDetail, RequestScope, SubmitRequest};

use crate::dto::request::{ListRequestsQuery, RejectBody, SubmitRequestBody};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /requests
pub async fn submit_kpi(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<SubmitRequestBody>,
) -> Result<Json<ApiResponse<ChangeRequest>>, ApiError> {
    submit(state, auth, RequestTarget::Kpi, body).await
}

/// POST /requests/kra
pub async fn submit_kra(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<SubmitRequestBody>,
) -> Result<Json<ApiResponse<ChangeRequest>>, ApiError> {
    submit(state, auth, RequestTarget::Kra, body).await
}

async fn submit(
    state: AppState,
    auth: AuthUser,
    target: RequestTarget,
    body: SubmitRequestBody,
) -> Result<Json<ApiResponse<ChangeRequest>>, ApiError> {
    let created = state
        .request_service
        .submit(
            &auth,
            SubmitRequest {
                target,
                kpi_id: body.kpi_id,
                kra_id: body.kra_id,
                requested_changes: body.requested_changes,
                comment: body.comment,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(created)))
}

/// GET /requests
pub async fn list_kpi(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListRequestsQuery>,
) -> Result<Json<ApiResponse<Vec<RequestSummary>>>, ApiError> {
    let requests = state
        .request_service
        .list(
            &auth,
            RequestTarget::Kpi,
            query.status,
            query.scope.unwrap_or(RequestScope::Mine),
        )
        .await?;

    Ok(Json(ApiResponse::ok(requests)))
}

/// GET /requests/kra
pub async fn list_kra(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListRequestsQuery>,
) -> Result<Json<ApiResponse<Vec<RequestSummary>>>, ApiError> {
    let requests = state
        .request_service
        .list(
            &auth,
            RequestTarget::Kra,
            query.status,
            query.scope.unwrap_or(RequestScope::Mine),
        )
        .await?;

    Ok(Json(ApiResponse::ok(requests)))
}

/// GET /requests/{id}
pub async fn detail_kpi(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RequestDetail>>, ApiError> {
    detail(state, auth, RequestTarget::Kpi, id).await
}

/// GET /requests/kra/{id}
pub async fn detail_kra(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RequestDetail>>, ApiError> {
    detail(state, auth, RequestTarget::Kra, id).await
}

async fn detail(
    state: AppState,
    auth: AuthUser,
    target: RequestTarget,
    id: Uuid,
) -> Result<Json<ApiResponse<RequestDetail>>, ApiError> {
    let detail = state.request_service.detail(&auth, target, id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// POST /requests/{id}/approve
pub async fn approve_kpi(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ChangeRequest>>, ApiError> {
    approve(state, auth, RequestTarget::Kpi, id).await
}

/// POST /requests/kra/{id}/approve
pub async fn approve_kra(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ChangeRequest>>, ApiError> {
    approve(state, auth, RequestTarget::Kra, id).await
}

async fn approve(
    state: AppState,
    auth: AuthUser,
    target: RequestTarget,
    id: Uuid,
) -> Result<Json<ApiResponse<ChangeRequest>>, ApiError> {
    let decided = state.request_service.approve(&auth, target, id).await?;
    Ok(Json(ApiResponse::ok(decided)))
}

/// POST /requests/{id}/reject
pub async fn reject_kpi(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<RejectBody>,
) -> Result<Json<ApiResponse<ChangeRequest>>, ApiError> {
    reject(state, auth, RequestTarget::Kpi, id, body).await
}

/// POST /requests/kra/{id}/reject
pub async fn reject_kra(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<RejectBody>,
) -> Result<Json<ApiResponse<ChangeRequest>>, ApiError> {
    reject(state, auth, RequestTarget::Kra, id, body).await
}

async fn reject(
    state: AppState,
    auth: AuthUser,
    target: RequestTarget,
    id: Uuid,
    body: RejectBody,
) -> Result<Json<ApiResponse<ChangeRequest>>, ApiError> {
    body.validate()?;

    let decided = state
        .request_service
        .reject(&auth, target, id, &body.comment)
        .await?;
    Ok(Json(ApiResponse::ok(decided)))
}
