//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use cafebeans_core::error::{AppError, ErrorKind};
use cafebeans_core::result::AppResult;
use cafebeans_entity::user::{User, UserCredentialRecord};

/// Repository for user lookup and registration.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the credential row for a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<UserCredentialRecord>> {
        sqlx::query_as::<_, UserCredentialRecord>(
            "SELECT id, email, password_hash, username, role_id FROM users \
             WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
        })
    }

    /// Find a user's profile by primary key.
    pub async fn find_profile(&self, user_id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, username, role_id FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Insert a new user and return the created profile.
    ///
    /// Unique-constraint violations surface as conflicts so callers can tell
    /// the client which field is already taken.
    pub async fn insert(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
        role_id: i32,
    ) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, username, password_hash, role_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, email, username, role_id",
        )
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .bind(role_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_username_key") =>
            {
                AppError::conflict("username has been used")
            }
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict("email has been used")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to insert user", e),
        })
    }
}
