//! Store capability interfaces.
//!
//! The session manager and authorizer depend on these traits rather than on
//! the concrete repositories, so the flows can be exercised against
//! in-memory stores in tests. `store` implements them for the SQL
//! repositories.

use async_trait::async_trait;
use uuid::Uuid;

use cafebeans_core::result::AppResult;
use cafebeans_entity::role::Role;
use cafebeans_entity::session::OauthSession;
use cafebeans_entity::user::{User, UserCredentialRecord};

/// Read and create users.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find the credential row for the given email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserCredentialRecord>>;

    /// Find a user's profile by id.
    async fn find_profile(&self, user_id: Uuid) -> AppResult<Option<User>>;

    /// Insert a new user with an already-hashed password.
    async fn insert_user(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
        role_id: i32,
    ) -> AppResult<User>;
}

/// Persist the mapping from issued token pairs to users.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a new session row and return its generated id.
    async fn create(
        &self,
        user_id: Uuid,
        access_token: &str,
        refresh_token: &str,
    ) -> AppResult<Uuid>;

    /// Look up a session by its stored refresh token value.
    async fn find_by_refresh_token(&self, refresh_token: &str)
    -> AppResult<Option<OauthSession>>;

    /// Whether the exact (user, access token) pair is still stored.
    ///
    /// Store errors are reported as `false`: the request pipeline treats any
    /// miss as an invalid token.
    async fn find_by_user_and_access_token(&self, user_id: Uuid, access_token: &str) -> bool;

    /// Rotate both token values of an existing session in place.
    async fn update_tokens(
        &self,
        session_id: Uuid,
        access_token: &str,
        refresh_token: &str,
    ) -> AppResult<()>;

    /// Delete a session row. Deleting a missing row is an error.
    async fn delete(&self, session_id: Uuid) -> AppResult<()>;
}

/// Read the role reference table.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// List all roles known to the system.
    async fn list_roles(&self) -> AppResult<Vec<Role>>;
}
