//! Session (oauth) repository implementation.
//!
//! The `oauth` table is the source of truth for revocation: a signed access
//! token is only honored while its exact value is still stored here.

use sqlx::PgPool;
use uuid::Uuid;

use cafebeans_core::error::{AppError, ErrorKind};
use cafebeans_core::result::AppResult;
use cafebeans_entity::session::OauthSession;

/// Repository for session row CRUD.
#[derive(Debug, Clone)]
pub struct OauthRepository {
    pool: PgPool,
}

impl OauthRepository {
    /// Create a new oauth repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new session row and return its generated id.
    pub async fn insert(
        &self,
        user_id: Uuid,
        access_token: &str,
        refresh_token: &str,
    ) -> AppResult<Uuid> {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO oauth (user_id, access_token, refresh_token) \
             VALUES ($1, $2, $3) \
             RETURNING id",
        )
        .bind(user_id)
        .bind(access_token)
        .bind(refresh_token)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "insert oauth failed", e))
    }

    /// Find a session row by its stored refresh token value.
    pub async fn find_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> AppResult<Option<OauthSession>> {
        sqlx::query_as::<_, OauthSession>(
            "SELECT id, user_id, access_token, refresh_token FROM oauth \
             WHERE refresh_token = $1",
        )
        .bind(refresh_token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find oauth by refresh token", e)
        })
    }

    /// Check whether the exact (user, access token) pair is still stored.
    pub async fn access_token_exists(
        &self,
        user_id: Uuid,
        access_token: &str,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT COUNT(*) = 1 FROM oauth WHERE user_id = $1 AND access_token = $2",
        )
        .bind(user_id)
        .bind(access_token)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check access token", e)
        })
    }

    /// Rotate both token values of an existing session in place.
    pub async fn update_tokens(
        &self,
        session_id: Uuid,
        access_token: &str,
        refresh_token: &str,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE oauth SET access_token = $2, refresh_token = $3 WHERE id = $1",
        )
        .bind(session_id)
        .bind(access_token)
        .bind(refresh_token)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "update oauth failed", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("oauth not found"));
        }
        Ok(())
    }

    /// Delete a session row. Deleting a missing row is an error.
    pub async fn delete(&self, session_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM oauth WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "delete oauth failed", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("oauth not found"));
        }
        Ok(())
    }
}
