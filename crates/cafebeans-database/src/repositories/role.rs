//! Role repository implementation.

use sqlx::PgPool;

use cafebeans_core::error::{AppError, ErrorKind};
use cafebeans_core::result::AppResult;
use cafebeans_entity::role::Role;

/// Repository for the read-only role reference table.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all roles ordered by id.
    pub async fn list(&self) -> AppResult<Vec<Role>> {
        sqlx::query_as::<_, Role>("SELECT id, title FROM roles ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list roles", e))
    }
}
