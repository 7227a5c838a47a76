//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use trackify_auth::jwt::{JwtDecoder, JwtEncoder};
use trackify_auth::password::PasswordHasher;
use trackify_core::config::AppConfig;

use trackify_database::repositories::{
    DirectoryRepository, KpiLogRepository, KpiRepository, KraRepository, NotificationRepository,
    PasswordResetRepository, RequestRepository, UserRepository,
};

use trackify_service::kpi::service::KpiService;
use trackify_service::notification::service::FeedService;
use trackify_service::request::service::RequestService;
use trackify_service::scoring::service::ScoringService;
use trackify_service::user::service::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,

    // ── Repositories ─────────────────────────────────────────
    /// User repository
    pub user_repo: Arc<UserRepository>,
    /// Role/department directory repository
    pub directory_repo: Arc<DirectoryRepository>,
    /// KRA repository
    pub kra_repo: Arc<KraRepository>,
    /// KPI repository
    pub kpi_repo: Arc<KpiRepository>,
    /// KPI change-log repository
    pub kpi_log_repo: Arc<KpiLogRepository>,
    /// Change-request repository
    pub request_repo: Arc<RequestRepository>,
    /// Notification feed repository
    pub notification_repo: Arc<NotificationRepository>,
    /// Password-reset token repository
    pub password_reset_repo: Arc<PasswordResetRepository>,

    // ── Services ─────────────────────────────────────────────
    /// User account service
    pub user_service: Arc<UserService>,
    /// KPI mutation and history service
    pub kpi_service: Arc<KpiService>,
    /// Scoring and review service
    pub scoring_service: Arc<ScoringService>,
    /// Change-request workflow service
    pub request_service: Arc<RequestService>,
    /// Notification feed service
    pub feed_service: Arc<FeedService>,
}
