//! Auth handlers — register, login, profile, password reset.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use trackify_service::user::service::RegisterRequest;

use crate::dto::request::{ForgotPasswordBody, LoginBody, RegisterBody, ResetPasswordBody};
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    body.validate()?;

    let user = state
        .user_service
        .register(RegisterRequest {
            name: body.name,
            email: body.email,
            password: body.password,
            role: body.role,
            role_id: body.role_id,
            dept: body.dept,
            dept_id: body.dept_id,
        })
        .await?;

    Ok(Json(ApiResponse::ok(user.into())))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    body.validate()?;

    let outcome = state.user_service.login(&body.email, &body.password).await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        access_token: outcome.access_token,
        expires_at: outcome.expires_at,
        user: outcome.user.into(),
    })))
}

/// GET /auth/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.profile(&auth).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// POST /auth/forgot
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordBody>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    body.validate()?;

    state.user_service.forgot_password(&body.email).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Password reset email sent".to_string(),
    })))
}

/// POST /auth/reset
pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordBody>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    body.validate()?;

    state
        .user_service
        .reset_password(&body.token, &body.password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Password has been reset".to_string(),
    })))
}
