//! Route definitions for the Trackify HTTP API.
//!
//! Routes are organized by domain. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state);

    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(request_routes())
        .merge(kpi_routes())
        .merge(scoring_routes())
        .merge(notification_routes())
        .merge(health_routes())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, profile, password reset
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/profile", get(handlers::auth::profile))
        .route("/auth/forgot", post(handlers::auth::forgot_password))
        .route("/auth/reset", post(handlers::auth::reset_password))
}

/// User self-service endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/avatar", post(handlers::user::upload_avatar))
        .route("/users/avatar/select", post(handlers::user::select_avatar))
}

/// Change-request workflow: KPI requests under `/requests`, KRA
/// requests under `/requests/kra`
fn request_routes() -> Router<AppState> {
    Router::new()
        .route("/requests", get(handlers::request::list_kpi))
        .route("/requests", post(handlers::request::submit_kpi))
        .route("/requests/kra", get(handlers::request::list_kra))
        .route("/requests/kra", post(handlers::request::submit_kra))
        .route("/requests/kra/{id}", get(handlers::request::detail_kra))
        .route(
            "/requests/kra/{id}/approve",
            post(handlers::request::approve_kra),
        )
        .route(
            "/requests/kra/{id}/reject",
            post(handlers::request::reject_kra),
        )
        .route("/requests/{id}", get(handlers::request::detail_kpi))
        .route("/requests/{id}/approve", post(handlers::request::approve_kpi))
        .route("/requests/{id}/reject", post(handlers::request::reject_kpi))
}

/// KPI endpoints: owned KPIs, available KRAs, change history, updates
fn kpi_routes() -> Router<AppState> {
    Router::new()
        .route("/kpi", get(handlers::kpi::my_kpis))
        .route("/kpi/available", get(handlers::kpi::available_kras))
        .route("/kpi/logs", get(handlers::kpi::kpi_logs))
        .route("/kpi/{id}", put(handlers::kpi::update_kpi))
}

/// Scoring and monthly review endpoints
fn scoring_routes() -> Router<AppState> {
    Router::new()
        .route("/scoring/kra/{id}", get(handlers::scoring::kra_scores))
        .route(
            "/review/employee/{id}/month",
            get(handlers::scoring::monthly_review),
        )
}

/// Notification feed endpoints
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notification/feed", get(handlers::notification::feed))
        .route("/notification/{id}", delete(handlers::notification::delete))
}

/// Health check endpoint (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use http::Method;
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    }

    cors = cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds));

    cors
}
