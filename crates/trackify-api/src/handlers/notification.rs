//! Notification feed handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use trackify_entity::notification::FeedNotification;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /notification/feed
pub async fn feed(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<FeedNotification>>>, ApiError> {
    let items = state.feed_service.feed(&auth).await?;
    Ok(Json(ApiResponse::ok(items)))
}

/// DELETE /notification/{id}
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.feed_service.delete(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Notification deleted".to_string(),
    })))
}
