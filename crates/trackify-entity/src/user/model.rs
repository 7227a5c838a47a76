//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered user in the Trackify system.
///
/// `role_id`/`dept_id` reference the name-keyed `roles`/`departments`
/// tables; `dept` carries the department name denormalized for display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Email address (unique, used for login).
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// User role.
    pub role: UserRole,
    /// Reference to the roles table.
    pub role_id: Option<Uuid>,
    /// Reference to the departments table.
    pub dept_id: Option<Uuid>,
    /// Department name (denormalized).
    pub dept: Option<String>,
    /// Avatar: a symbolic default key (`default:N`) or an uploaded-file URL.
    pub avatar: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
    /// Resolved role row.
    pub role_id: Option<Uuid>,
    /// Resolved department row.
    pub dept_id: Option<Uuid>,
    /// Department name (denormalized).
    pub dept: Option<String>,
}
