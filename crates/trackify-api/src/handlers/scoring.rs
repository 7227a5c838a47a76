//! Scoring and review handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use trackify_entity::kpi::KpiScore;
use trackify_service::scoring::service::MonthlyReview;

use crate::dto::request::MonthQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /scoring/kra/{id}
pub async fn kra_scores(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<KpiScore>>>, ApiError> {
    let scores = state.scoring_service.kra_scores(id).await?;
    Ok(Json(ApiResponse::ok(scores)))
}

/// GET /review/employee/{id}/month
pub async fn monthly_review(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<ApiResponse<MonthlyReview>>, ApiError> {
    let review = state
        .scoring_service
        .monthly_review(id, query.year, query.month)
        .await?;

    Ok(Json(ApiResponse::ok(review)))
}
