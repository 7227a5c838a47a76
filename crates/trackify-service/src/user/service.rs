//! User service: registration with role/department resolution, login,
//! profile, password reset and avatar updates.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use trackify_auth::jwt::JwtEncoder;
use trackify_auth::password::{PasswordHasher, ResetToken};
use trackify_core::config::{AuthConfig, MailConfig};
use trackify_core::error::AppError;
use trackify_core::result::AppResult;
use trackify_database::repositories::{DirectoryRepository, PasswordResetRepository, UserRepository};
use trackify_entity::user::{CreateUser, User, UserRole};

use crate::context::RequestContext;
use crate::mail::{Mailer, mailer::send_detached};

/// Registration input. Role and department come as names (with optional
/// ids) and are resolved against the directory: id first, then name,
/// creating the row when the name is new.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub role_id: Option<Uuid>,
    pub dept: Option<String>,
    pub dept_id: Option<Uuid>,
}

/// A successful login: the user plus a signed access token.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub user: User,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Handles user account operations.
#[derive(Clone)]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    directory_repo: Arc<DirectoryRepository>,
    reset_repo: Arc<PasswordResetRepository>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
    mailer: Arc<dyn Mailer>,
    auth_config: AuthConfig,
    mail_config: MailConfig,
}

impl UserService {
    /// Creates a new user service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<UserRepository>,
        directory_repo: Arc<DirectoryRepository>,
        reset_repo: Arc<PasswordResetRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        mailer: Arc<dyn Mailer>,
        auth_config: AuthConfig,
        mail_config: MailConfig,
    ) -> Self {
        Self {
            user_repo,
            directory_repo,
            reset_repo,
            hasher,
            encoder,
            mailer,
            auth_config,
            mail_config,
        }
    }

    /// Registers a new user, resolving role and department lazily, and
    /// emails the credentials to the new account (fire-and-forget).
    pub async fn register(&self, req: RegisterRequest) -> AppResult<User> {
        if req.password.trim().is_empty() {
            return Err(AppError::validation("Password is required"));
        }
        if req.password.len() < self.auth_config.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.auth_config.password_min_length
            )));
        }

        let role = UserRole::from_str(&req.role)?;

        // Resolve by id first, then by name (creating when absent).
        let role_row = match req.role_id {
            Some(id) => self.directory_repo.find_role_by_id(id).await?,
            None => None,
        };
        let role_row = match role_row {
            Some(row) => row,
            None => self.directory_repo.resolve_role(role.as_title()).await?,
        };

        let dept_row = match req.dept_id {
            Some(id) => self.directory_repo.find_department_by_id(id).await?,
            None => None,
        };
        let dept_row = match (dept_row, &req.dept) {
            (Some(row), _) => Some(row),
            (None, Some(name)) if !name.trim().is_empty() => {
                Some(self.directory_repo.resolve_department(name.trim()).await?)
            }
            (None, _) => None,
        };

        let password_hash = self.hasher.hash_password(&req.password)?;

        let user = self
            .user_repo
            .create(&CreateUser {
                name: req.name.clone(),
                email: req.email.clone(),
                password_hash,
                role,
                role_id: Some(role_row.id),
                dept_id: dept_row.as_ref().map(|d| d.id),
                dept: dept_row.map(|d| d.name),
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User registered");

        // The credentials mail intentionally carries the chosen password
        // so the new account can sign in from the welcome message.
        if self.mail_config.enabled {
            let body = format!(
                "Hello {},\n\nYour Trackify account is ready.\n\n\
                 Login: {}\nEmail: {}\nPassword: {}\n",
                user.name, self.mail_config.login_url, user.email, req.password
            );
            send_detached(
                self.mailer.clone(),
                user.email.clone(),
                "Your Trackify account".to_string(),
                body,
            );
        }

        Ok(user)
    }

    /// Verifies credentials and issues an access token.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let (access_token, expires_at) =
            self.encoder
                .generate_access_token(user.id, user.role, &user.name)?;

        info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome {
            user,
            access_token,
            expires_at,
        })
    }

    /// Gets the current user's full profile.
    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Starts the password-reset flow: issues a single-use token and
    /// emails the reset link.
    pub async fn forgot_password(&self, email: &str) -> AppResult<()> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::validation("Email is not registered"))?;

        let token = ResetToken::issue(&self.auth_config);
        self.reset_repo
            .create(&token.token_hash, user.id, token.expires_at)
            .await?;

        if self.mail_config.enabled {
            let body = format!(
                "Hello {},\n\nUse this link to reset your Trackify password:\n\
                 {}?reset={}\n\nThe link expires at {}.\n",
                user.name, self.mail_config.login_url, token.token, token.expires_at
            );
            send_detached(
                self.mailer.clone(),
                user.email.clone(),
                "Reset your Trackify password".to_string(),
                body,
            );
        }

        info!(user_id = %user.id, "Password reset requested");
        Ok(())
    }

    /// Completes the password-reset flow by consuming the token.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> AppResult<()> {
        if new_password.len() < self.auth_config.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.auth_config.password_min_length
            )));
        }

        let user_id = self
            .reset_repo
            .consume(&ResetToken::hash(token))
            .await?
            .ok_or_else(|| AppError::validation("Invalid or expired reset token"))?;

        let hash = self.hasher.hash_password(new_password)?;
        self.user_repo.update_password(user_id, &hash).await?;

        info!(user_id = %user_id, "Password reset completed");
        Ok(())
    }

    /// Stores a symbolic default-avatar key for the current user.
    pub async fn select_avatar(&self, ctx: &RequestContext, key: &str) -> AppResult<User> {
        if key.trim().is_empty() {
            return Err(AppError::validation("Avatar key is required"));
        }
        self.user_repo
            .update_avatar(ctx.user_id, &format!("default:{}", key.trim()))
            .await
    }

    /// Stores an uploaded-avatar URL reference for the current user.
    pub async fn upload_avatar(&self, ctx: &RequestContext, url: &str) -> AppResult<User> {
        if url.trim().is_empty() {
            return Err(AppError::validation("Avatar URL is required"));
        }
        self.user_repo.update_avatar(ctx.user_id, url.trim()).await
    }
}
