//! In-memory store implementations for exercising the session flows
//! without a database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use cafebeans_auth::{RoleStore, SessionStore, UserStore};
use cafebeans_core::error::AppError;
use cafebeans_core::result::AppResult;
use cafebeans_entity::role::Role;
use cafebeans_entity::session::OauthSession;
use cafebeans_entity::user::{User, UserCredentialRecord};

/// User storage backed by a vector behind a mutex.
#[derive(Default)]
pub struct MockUserStore {
    users: Mutex<Vec<UserCredentialRecord>>,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user directly, bypassing registration. Returns the generated id.
    pub fn seed(&self, email: &str, username: &str, password_hash: &str, role_id: i32) -> Uuid {
        let id = Uuid::new_v4();
        self.users
            .lock()
            .unwrap()
            .push(UserCredentialRecord {
                id,
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                username: username.to_string(),
                role_id,
            });
        id
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserCredentialRecord>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_profile(&self, user_id: Uuid) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .map(UserCredentialRecord::into_profile))
    }

    async fn insert_user(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
        role_id: i32,
    ) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(AppError::conflict("email has been used"));
        }
        if users.iter().any(|u| u.username == username) {
            return Err(AppError::conflict("username has been used"));
        }
        let record = UserCredentialRecord {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            username: username.to_string(),
            role_id,
        };
        users.push(record.clone());
        Ok(record.into_profile())
    }
}

/// Session storage backed by a map behind a mutex.
#[derive(Default)]
pub struct MockSessionStore {
    sessions: Mutex<HashMap<Uuid, OauthSession>>,
}

impl MockSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, session_id: Uuid) -> Option<OauthSession> {
        self.sessions.lock().unwrap().get(&session_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn create(
        &self,
        user_id: Uuid,
        access_token: &str,
        refresh_token: &str,
    ) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        self.sessions.lock().unwrap().insert(
            id,
            OauthSession {
                id,
                user_id,
                access_token: access_token.to_string(),
                refresh_token: refresh_token.to_string(),
            },
        );
        Ok(id)
    }

    async fn find_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> AppResult<Option<OauthSession>> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .values()
            .find(|s| s.refresh_token == refresh_token)
            .cloned())
    }

    async fn find_by_user_and_access_token(&self, user_id: Uuid, access_token: &str) -> bool {
        self.sessions
            .lock()
            .unwrap()
            .values()
            .any(|s| s.user_id == user_id && s.access_token == access_token)
    }

    async fn update_tokens(
        &self,
        session_id: Uuid,
        access_token: &str,
        refresh_token: &str,
    ) -> AppResult<()> {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.get_mut(&session_id) {
            Some(session) => {
                session.access_token = access_token.to_string();
                session.refresh_token = refresh_token.to_string();
                Ok(())
            }
            None => Err(AppError::not_found("oauth not found")),
        }
    }

    async fn delete(&self, session_id: Uuid) -> AppResult<()> {
        match self.sessions.lock().unwrap().remove(&session_id) {
            Some(_) => Ok(()),
            None => Err(AppError::not_found("oauth not found")),
        }
    }
}

/// Fixed role table.
pub struct MockRoleStore {
    roles: Vec<Role>,
}

impl MockRoleStore {
    pub fn with_roles(roles: Vec<Role>) -> Self {
        Self { roles }
    }

    /// The customer/admin pair used by most tests.
    pub fn standard() -> Self {
        Self::with_roles(vec![
            Role {
                id: 1,
                title: "customer".to_string(),
            },
            Role {
                id: 2,
                title: "admin".to_string(),
            },
        ])
    }
}

#[async_trait]
impl RoleStore for MockRoleStore {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        Ok(self.roles.clone())
    }
}
