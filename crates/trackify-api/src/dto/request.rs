//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use trackify_entity::request::RequestStatus;
use trackify_service::request::service::RequestScope;

/// Registration request body. Role and department arrive as names with
/// optional directory ids.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterBody {
    /// Display name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Email address (login identifier).
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Initial password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Role name.
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
    /// Optional role directory id.
    pub role_id: Option<Uuid>,
    /// Optional department name.
    pub dept: Option<String>,
    /// Optional department directory id.
    pub dept_id: Option<Uuid>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginBody {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Forgot-password request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordBody {
    /// Email address of the account to reset.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
}

/// Reset-password request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordBody {
    /// Single-use reset token from the email link.
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
    /// New password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Uploaded-avatar request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AvatarBody {
    /// URL of the uploaded image.
    #[validate(length(min = 1, message = "Avatar URL is required"))]
    pub url: String,
}

/// Default-avatar selection body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AvatarSelectBody {
    /// Symbolic key of the chosen default avatar.
    #[validate(length(min = 1, message = "Avatar key is required"))]
    pub key: String,
}

/// Change-request submission body. The target comes from the route; the
/// change payload is stored verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequestBody {
    /// Targeted KPI (KPI requests only).
    pub kpi_id: Option<Uuid>,
    /// Targeted or parent KRA.
    pub kra_id: Option<Uuid>,
    /// The requested change payload, kept as submitted.
    pub requested_changes: String,
    /// Optional note to the decider.
    pub comment: Option<String>,
}

/// Rejection body; the comment is mandatory.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RejectBody {
    /// Why the request is rejected.
    #[validate(length(min = 1, message = "A comment is required to reject"))]
    pub comment: String,
}

/// KPI update body; absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateKpiBody {
    /// New KPI name.
    pub name: Option<String>,
    /// New due date.
    pub due_date: Option<NaiveDate>,
    /// New completion percentage.
    pub percentage: Option<i32>,
}

/// Query parameters for request listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRequestsQuery {
    /// Filter by status; all statuses when absent.
    pub status: Option<RequestStatus>,
    /// Listing scope; the caller's own submissions when absent.
    pub scope: Option<RequestScope>,
}

/// Query parameters for the monthly review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthQuery {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
}
