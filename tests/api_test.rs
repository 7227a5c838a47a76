//! HTTP-boundary integration tests.
//!
//! These exercise the router, extractors, validation, and error mapping
//! against a lazily-connected pool, so they run without a database:
//! every assertion here is about behavior that resolves before the
//! first query (or degrades when the database is away).

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_health_reports_database_state() {
    let app = TestApp::new();
    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "degraded");
    assert_eq!(response.body["data"]["database"], "unavailable");
}

#[tokio::test]
async fn test_protected_routes_require_auth() {
    let app = TestApp::new();

    for (method, path) in [
        ("GET", "/auth/profile"),
        ("GET", "/kpi"),
        ("GET", "/kpi/logs"),
        ("GET", "/kpi/available"),
        ("GET", "/requests"),
        ("GET", "/notification/feed"),
    ] {
        let response = app.request(method, path, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{method} {path}");
        assert_eq!(response.body["error"], "AUTHENTICATION");
    }
}

#[tokio::test]
async fn test_malformed_bearer_token_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/auth/profile", None, Some("not-a-bearer-scheme"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request_with_bearer("GET", "/auth/profile", None, "garbage.token.here")
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_wrong_secret_is_rejected() {
    let app = TestApp::new();
    let token = helpers::token_with_secret("some-other-secret");

    let response = app
        .request_with_bearer("GET", "/auth/profile", None, &token)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "AUTHENTICATION");
}

#[tokio::test]
async fn test_register_validates_email() {
    let app = TestApp::new();
    let body = json!({
        "name": "Alice",
        "email": "not-an-email",
        "password": "secret1",
        "role": "Employee",
    });

    let response = app.request("POST", "/auth/register", Some(body), None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_login_requires_credentials() {
    let app = TestApp::new();
    let body = json!({ "email": "", "password": "" });

    let response = app.request("POST", "/auth/login", Some(body), None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reject_requires_comment() {
    let app = TestApp::new();
    let token = app.issue_token();
    let id = uuid::Uuid::new_v4();

    let response = app
        .request_with_bearer(
            "POST",
            &format!("/requests/{id}/reject"),
            Some(json!({ "comment": "" })),
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_kpi_update_validates_percentage_range() {
    let app = TestApp::new();
    let token = app.issue_token();
    let id = uuid::Uuid::new_v4();

    for pct in [-1, 101, 250] {
        let response = app
            .request_with_bearer(
                "PUT",
                &format!("/kpi/{id}"),
                Some(json!({ "percentage": pct })),
                &token,
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "pct={pct}");
    }
}

#[tokio::test]
async fn test_monthly_review_validates_month() {
    let app = TestApp::new();
    let token = app.issue_token();
    let id = uuid::Uuid::new_v4();

    let response = app
        .request_with_bearer(
            "GET",
            &format!("/review/employee/{id}/month?year=2026&month=13"),
            None,
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new();
    let response = app.request("GET", "/no/such/route", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_server_errors_hide_internals() {
    // With the database away, an authenticated request that needs it
    // must surface a 500 with a generic message, not the sqlx error.
    let app = TestApp::new();
    let token = app.issue_token();

    let response = app
        .request_with_bearer("GET", "/auth/profile", None, &token)
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["message"], "Internal server error");
}
