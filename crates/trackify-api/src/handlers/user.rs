//! User self-service handlers — avatar updates.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use crate::dto::request::{AvatarBody, AvatarSelectBody};
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /users/avatar
pub async fn upload_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<AvatarBody>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    body.validate()?;

    let user = state.user_service.upload_avatar(&auth, &body.url).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// POST /users/avatar/select
pub async fn select_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<AvatarSelectBody>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    body.validate()?;

    let user = state.user_service.select_avatar(&auth, &body.key).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
