//! KPI handlers — available KRAs, change history, and audited updates.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use trackify_entity::kpi::{Kpi, Kra, UpdateKpi};
use trackify_service::kpi::service::KpiLogGroup;

use crate::dto::request::UpdateKpiBody;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /kpi/available
pub async fn available_kras(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Kra>>>, ApiError> {
    let kras = state.scoring_service.available_kras(&auth).await?;
    Ok(Json(ApiResponse::ok(kras)))
}

/// GET /kpi
pub async fn my_kpis(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Kpi>>>, ApiError> {
    let kpis = state.kpi_service.kpis_for_owner(&auth).await?;
    Ok(Json(ApiResponse::ok(kpis)))
}

/// GET /kpi/logs
pub async fn kpi_logs(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<KpiLogGroup>>>, ApiError> {
    let groups = state.kpi_service.logs_for_owner(&auth).await?;
    Ok(Json(ApiResponse::ok(groups)))
}

/// PUT /kpi/{id}
pub async fn update_kpi(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateKpiBody>,
) -> Result<Json<ApiResponse<Kpi>>, ApiError> {
    let kpi = state
        .kpi_service
        .update_kpi(
            &auth,
            id,
            UpdateKpi {
                name: body.name,
                due_date: body.due_date,
                percentage: body.percentage,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(kpi)))
}
