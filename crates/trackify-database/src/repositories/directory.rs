//! Role and department directory repository.
//!
//! Roles and departments are name-keyed reference entities resolved
//! lazily at registration time. Resolution is a single upsert statement
//! so the same name can never produce two rows, even under concurrent
//! registrations.

use sqlx::PgPool;
use uuid::Uuid;

use trackify_core::error::{AppError, ErrorKind};
use trackify_core::result::AppResult;
use trackify_entity::org::{Department, Role};

/// Repository for the name-keyed role/department directory.
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    pool: PgPool,
}

impl DirectoryRepository {
    /// Create a new directory repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a role row by primary key.
    pub async fn find_role_by_id(&self, id: Uuid) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find role", e))
    }

    /// Resolve a role by name, creating it if absent.
    ///
    /// The no-op `DO UPDATE` makes `RETURNING` yield the existing row on
    /// conflict, so the second call with the same name returns the same id.
    pub async fn resolve_role(&self, name: &str) -> AppResult<Role> {
        sqlx::query_as::<_, Role>(
            "INSERT INTO roles (name) VALUES ($1) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING *",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to resolve role", e))
    }

    /// Find a department row by primary key.
    pub async fn find_department_by_id(&self, id: Uuid) -> AppResult<Option<Department>> {
        sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find department", e))
    }

    /// Resolve a department by name, creating it if absent.
    pub async fn resolve_department(&self, name: &str) -> AppResult<Department> {
        sqlx::query_as::<_, Department>(
            "INSERT INTO departments (name) VALUES ($1) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING *",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to resolve department", e)
        })
    }
}
