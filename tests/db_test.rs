//! Database-backed integration tests.
//!
//! These run only when `TRACKIFY_TEST_DATABASE_URL` points at a reachable
//! Postgres instance; otherwise each test skips. Migrations are applied on
//! connect and every test seeds its own uniquely-named rows, so the suite
//! is safe to run repeatedly against the same database.

use std::sync::Arc;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use trackify_core::error::ErrorKind;
use trackify_database::migration::run_migrations;
use trackify_database::repositories::{
    DirectoryRepository, KpiRepository, NotificationRepository, RequestRepository, UserRepository,
};
use trackify_entity::request::{CreateChangeRequest, RequestStatus, RequestTarget};
use trackify_entity::user::{CreateUser, User, UserRole};
use trackify_service::context::RequestContext;
use trackify_service::request::service::{RequestService, SubmitRequest};

async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("TRACKIFY_TEST_DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect(&url)
        .await
        .expect("Failed to connect to test database");
    run_migrations(&pool).await.expect("Failed to run migrations");
    Some(pool)
}

async fn seed_user(
    pool: &PgPool,
    role: UserRole,
    dept_id: Option<Uuid>,
    dept: Option<String>,
) -> User {
    let tag = Uuid::new_v4();
    UserRepository::new(pool.clone())
        .create(&CreateUser {
            name: format!("user-{tag}"),
            email: format!("user-{tag}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            role,
            role_id: None,
            dept_id,
            dept,
        })
        .await
        .expect("Failed to seed user")
}

async fn seed_kra(pool: &PgPool, dept_id: Uuid) -> Uuid {
    sqlx::query_scalar::<_, Uuid>("INSERT INTO kras (name, dept_id) VALUES ($1, $2) RETURNING id")
        .bind(format!("kra-{}", Uuid::new_v4()))
        .bind(dept_id)
        .fetch_one(pool)
        .await
        .expect("Failed to seed KRA")
}

fn request_service(pool: &PgPool) -> RequestService {
    RequestService::new(
        Arc::new(RequestRepository::new(pool.clone())),
        Arc::new(UserRepository::new(pool.clone())),
        Arc::new(KpiRepository::new(pool.clone())),
        Arc::new(NotificationRepository::new(pool.clone())),
    )
}

fn ctx_for(user: &User) -> RequestContext {
    RequestContext::new(user.id, user.role, user.name.clone())
}

#[tokio::test]
async fn test_directory_resolution_reuses_rows() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: TRACKIFY_TEST_DATABASE_URL not set");
        return;
    };
    let dirs = DirectoryRepository::new(pool.clone());

    let role_name = format!("role-{}", Uuid::new_v4());
    let first = dirs.resolve_role(&role_name).await.unwrap();
    let second = dirs.resolve_role(&role_name).await.unwrap();
    assert_eq!(first.id, second.id);

    let dept_name = format!("dept-{}", Uuid::new_v4());
    let first = dirs.resolve_department(&dept_name).await.unwrap();
    let second = dirs.resolve_department(&dept_name).await.unwrap();
    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn test_decide_is_single_shot() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: TRACKIFY_TEST_DATABASE_URL not set");
        return;
    };
    let dirs = DirectoryRepository::new(pool.clone());
    let requests = RequestRepository::new(pool.clone());

    let dept = dirs
        .resolve_department(&format!("dept-{}", Uuid::new_v4()))
        .await
        .unwrap();
    let requester = seed_user(
        &pool,
        UserRole::Manager,
        Some(dept.id),
        Some(dept.name.clone()),
    )
    .await;
    let admin = seed_user(&pool, UserRole::Admin, None, None).await;
    let kra_id = seed_kra(&pool, dept.id).await;

    let created = requests
        .create(&CreateChangeRequest {
            target: RequestTarget::Kra,
            kpi_id: None,
            kra_id,
            requester_id: requester.id,
            requester_role: requester.role,
            requester_name: requester.name.clone(),
            requester_dept: requester.dept.clone(),
            requested_changes: r#"{"target": 12}"#.to_string(),
            request_comment: None,
        })
        .await
        .unwrap();
    assert_eq!(created.status, RequestStatus::Pending);

    let first = requests
        .decide(created.id, RequestStatus::Approved, admin.id, None)
        .await
        .unwrap();
    assert_eq!(first.map(|r| r.status), Some(RequestStatus::Approved));

    // The guarded UPDATE matches nothing once the row left pending.
    let second = requests
        .decide(created.id, RequestStatus::Rejected, admin.id, Some("late"))
        .await
        .unwrap();
    assert!(second.is_none());
}

#[tokio::test]
async fn test_second_decision_conflicts() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: TRACKIFY_TEST_DATABASE_URL not set");
        return;
    };
    let dirs = DirectoryRepository::new(pool.clone());
    let service = request_service(&pool);

    let dept = dirs
        .resolve_department(&format!("dept-{}", Uuid::new_v4()))
        .await
        .unwrap();
    let manager = seed_user(
        &pool,
        UserRole::Manager,
        Some(dept.id),
        Some(dept.name.clone()),
    )
    .await;
    let admin = seed_user(&pool, UserRole::Admin, None, None).await;
    let kra_id = seed_kra(&pool, dept.id).await;

    let created = service
        .submit(
            &ctx_for(&manager),
            SubmitRequest {
                target: RequestTarget::Kra,
                kpi_id: None,
                kra_id: Some(kra_id),
                requested_changes: r#"{"target": 20}"#.to_string(),
                comment: None,
            },
        )
        .await
        .unwrap();

    let decided = service
        .approve(&ctx_for(&admin), RequestTarget::Kra, created.id)
        .await
        .unwrap();
    assert_eq!(decided.status, RequestStatus::Approved);

    let err = service
        .approve(&ctx_for(&admin), RequestTarget::Kra, created.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert!(err.message.contains("already been decided"));
    // The conflict names the request's actual state, never the stale
    // pending one the loser observed.
    assert!(!err.message.contains("Pending"));
}

#[tokio::test]
async fn test_request_invisible_under_other_target_family() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: TRACKIFY_TEST_DATABASE_URL not set");
        return;
    };
    let dirs = DirectoryRepository::new(pool.clone());
    let service = request_service(&pool);

    let dept = dirs
        .resolve_department(&format!("dept-{}", Uuid::new_v4()))
        .await
        .unwrap();
    let manager = seed_user(
        &pool,
        UserRole::Manager,
        Some(dept.id),
        Some(dept.name.clone()),
    )
    .await;
    let admin = seed_user(&pool, UserRole::Admin, None, None).await;
    let kra_id = seed_kra(&pool, dept.id).await;

    let created = service
        .submit(
            &ctx_for(&manager),
            SubmitRequest {
                target: RequestTarget::Kra,
                kpi_id: None,
                kra_id: Some(kra_id),
                requested_changes: r#"{"name": "Refocused KRA"}"#.to_string(),
                comment: None,
            },
        )
        .await
        .unwrap();

    // A KRA request does not exist as far as the KPI family is concerned,
    // for reads and decisions alike.
    let err = service
        .detail(&ctx_for(&manager), RequestTarget::Kpi, created.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = service
        .approve(&ctx_for(&admin), RequestTarget::Kpi, created.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let detail = service
        .detail(&ctx_for(&manager), RequestTarget::Kra, created.id)
        .await
        .unwrap();
    assert_eq!(detail.summary.id, created.id);
    assert_eq!(detail.summary.target, RequestTarget::Kra);
}
