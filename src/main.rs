//! Trackify Server — Role-based KPI/KRA performance management
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use trackify_core::config::AppConfig;
use trackify_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("TRACKIFY_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Trackify v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = trackify_database::DatabasePool::connect(&config.database).await?;
    trackify_database::migration::run_migrations(db.pool()).await?;
    let db_pool = db.pool().clone();

    // ── Step 2: Initialize repositories ──────────────────────────
    let user_repo = Arc::new(trackify_database::repositories::UserRepository::new(
        db_pool.clone(),
    ));
    let directory_repo = Arc::new(trackify_database::repositories::DirectoryRepository::new(
        db_pool.clone(),
    ));
    let kra_repo = Arc::new(trackify_database::repositories::KraRepository::new(
        db_pool.clone(),
    ));
    let kpi_repo = Arc::new(trackify_database::repositories::KpiRepository::new(
        db_pool.clone(),
    ));
    let kpi_log_repo = Arc::new(trackify_database::repositories::KpiLogRepository::new(
        db_pool.clone(),
    ));
    let request_repo = Arc::new(trackify_database::repositories::RequestRepository::new(
        db_pool.clone(),
    ));
    let notification_repo = Arc::new(
        trackify_database::repositories::NotificationRepository::new(db_pool.clone()),
    );
    let password_reset_repo = Arc::new(
        trackify_database::repositories::PasswordResetRepository::new(db_pool.clone()),
    );

    // ── Step 3: Initialize auth system ───────────────────────────
    let password_hasher = Arc::new(trackify_auth::password::PasswordHasher::new());
    let jwt_encoder = Arc::new(trackify_auth::jwt::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(trackify_auth::jwt::JwtDecoder::new(&config.auth));

    // ── Step 4: Initialize services ──────────────────────────────
    let mailer: Arc<dyn trackify_service::mail::Mailer> =
        Arc::new(trackify_service::mail::LogMailer);

    let user_service = Arc::new(trackify_service::user::service::UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&directory_repo),
        Arc::clone(&password_reset_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
        Arc::clone(&mailer),
        config.auth.clone(),
        config.mail.clone(),
    ));
    let kpi_service = Arc::new(trackify_service::kpi::service::KpiService::new(
        Arc::clone(&kpi_repo),
        Arc::clone(&kpi_log_repo),
    ));
    let scoring_service = Arc::new(trackify_service::scoring::service::ScoringService::new(
        Arc::clone(&kpi_repo),
        Arc::clone(&kra_repo),
        Arc::clone(&user_repo),
    ));
    let request_service = Arc::new(trackify_service::request::service::RequestService::new(
        Arc::clone(&request_repo),
        Arc::clone(&user_repo),
        Arc::clone(&kpi_repo),
        Arc::clone(&notification_repo),
    ));
    let feed_service = Arc::new(trackify_service::notification::service::FeedService::new(
        Arc::clone(&notification_repo),
    ));

    tracing::info!("Services initialized");

    // ── Step 5: Build and start HTTP server ──────────────────────
    let app_state = trackify_api::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),

        jwt_encoder: Arc::clone(&jwt_encoder),
        jwt_decoder: Arc::clone(&jwt_decoder),
        password_hasher: Arc::clone(&password_hasher),

        user_repo: Arc::clone(&user_repo),
        directory_repo: Arc::clone(&directory_repo),
        kra_repo: Arc::clone(&kra_repo),
        kpi_repo: Arc::clone(&kpi_repo),
        kpi_log_repo: Arc::clone(&kpi_log_repo),
        request_repo: Arc::clone(&request_repo),
        notification_repo: Arc::clone(&notification_repo),
        password_reset_repo: Arc::clone(&password_reset_repo),

        user_service,
        kpi_service,
        scoring_service,
        request_service,
        feed_service,
    };

    let app = trackify_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Trackify server listening on {}", addr);

    // ── Step 6: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    db.close().await;
    tracing::info!("Trackify server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
