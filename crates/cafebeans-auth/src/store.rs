//! SQL-backed implementations of the store capability traits.

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use cafebeans_core::result::AppResult;
use cafebeans_database::repositories::{OauthRepository, RoleRepository, UserRepository};
use cafebeans_entity::role::Role;
use cafebeans_entity::session::OauthSession;
use cafebeans_entity::user::{User, UserCredentialRecord};

use crate::traits::{RoleStore, SessionStore, UserStore};

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserCredentialRecord>> {
        UserRepository::find_by_email(self, email).await
    }

    async fn find_profile(&self, user_id: Uuid) -> AppResult<Option<User>> {
        UserRepository::find_profile(self, user_id).await
    }

    async fn insert_user(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
        role_id: i32,
    ) -> AppResult<User> {
        self.insert(email, username, password_hash, role_id).await
    }
}

#[async_trait]
impl SessionStore for OauthRepository {
    async fn create(
        &self,
        user_id: Uuid,
        access_token: &str,
        refresh_token: &str,
    ) -> AppResult<Uuid> {
        self.insert(user_id, access_token, refresh_token).await
    }

    async fn find_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> AppResult<Option<OauthSession>> {
        OauthRepository::find_by_refresh_token(self, refresh_token).await
    }

    async fn find_by_user_and_access_token(&self, user_id: Uuid, access_token: &str) -> bool {
        match self.access_token_exists(user_id, access_token).await {
            Ok(found) => found,
            Err(e) => {
                // The pipeline only understands yes/no here; keep the
                // failure visible to operators.
                warn!(user_id = %user_id, error = %e, "Access token check failed");
                false
            }
        }
    }

    async fn update_tokens(
        &self,
        session_id: Uuid,
        access_token: &str,
        refresh_token: &str,
    ) -> AppResult<()> {
        OauthRepository::update_tokens(self, session_id, access_token, refresh_token).await
    }

    async fn delete(&self, session_id: Uuid) -> AppResult<()> {
        OauthRepository::delete(self, session_id).await
    }
}

#[async_trait]
impl RoleStore for RoleRepository {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.list().await
    }
}
