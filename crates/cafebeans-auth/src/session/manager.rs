//! Session lifecycle manager — sign-in, refresh, and sign-out flows.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use cafebeans_core::error::AppError;
use cafebeans_core::result::AppResult;
use cafebeans_entity::session::{Passport, TokenPair};
use cafebeans_entity::user::{RegisterRequest, User, UserClaims};

use crate::jwt::{JwtCodec, TokenKind};
use crate::password::PasswordHasher;
use crate::traits::{SessionStore, UserStore};

/// Role id assigned to self-registered customers.
const ROLE_CUSTOMER: i32 = 1;
/// Role id assigned to admin accounts.
const ROLE_ADMIN: i32 = 2;

/// Composes the token codec, password hasher, and stores into the session
/// flows.
///
/// Every flow forwards the first failure it encounters; nothing is persisted
/// once an earlier step has failed.
#[derive(Clone)]
pub struct SessionManager {
    /// Token signing and verification.
    codec: JwtCodec,
    /// Password hashing.
    hasher: PasswordHasher,
    /// User persistence.
    users: Arc<dyn UserStore>,
    /// Session persistence.
    sessions: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        codec: JwtCodec,
        hasher: PasswordHasher,
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            codec,
            hasher,
            users,
            sessions,
        }
    }

    /// Performs the sign-in flow:
    ///
    /// 1. Look up the credential row by email
    /// 2. Verify the password
    /// 3. Issue an access + refresh token pair
    /// 4. Persist the session row
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<Passport> {
        let record = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("user not found"))?;

        if !self.hasher.verify_password(password, &record.password_hash)? {
            warn!(user_id = %record.id, "Sign-in rejected: bad password");
            return Err(AppError::authentication("password is incorrect"));
        }

        let claims = UserClaims {
            id: record.id,
            role_id: record.role_id,
        };
        let access_token = self.codec.issue(TokenKind::Access, Some(claims.clone()))?;
        let refresh_token = self.codec.issue(TokenKind::Refresh, Some(claims))?;

        let session_id = self
            .sessions
            .create(record.id, &access_token, &refresh_token)
            .await?;

        info!(user_id = %record.id, session_id = %session_id, "Sign-in successful");

        Ok(Passport {
            user: record.into_profile(),
            token: TokenPair {
                session_id,
                access_token,
                refresh_token,
            },
        })
    }

    /// Performs the refresh flow:
    ///
    /// 1. Verify the refresh token's signature and expiry
    /// 2. Look up the session row holding this exact token value
    /// 3. Load the user's current profile (role may have changed)
    /// 4. Issue a fresh access token and a repeated refresh token that keeps
    ///    the original expiry instant
    /// 5. Rotate the session row in place
    ///
    /// Both the token-level and store-level checks must pass; a signed token
    /// whose session row is gone is rejected.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<Passport> {
        let token_claims = self.codec.verify(TokenKind::Refresh, refresh_token)?;

        let session = self
            .sessions
            .find_by_refresh_token(refresh_token)
            .await?
            .ok_or_else(|| AppError::not_found("oauth not found"))?;

        let profile = self
            .users
            .find_profile(session.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("user not found"))?;

        let claims = UserClaims {
            id: profile.id,
            role_id: profile.role_id,
        };
        let access_token = self.codec.issue(TokenKind::Access, Some(claims.clone()))?;
        let new_refresh_token = self.codec.repeat_refresh(claims, token_claims.exp)?;

        self.sessions
            .update_tokens(session.id, &access_token, &new_refresh_token)
            .await?;

        info!(user_id = %profile.id, session_id = %session.id, "Tokens rotated");

        Ok(Passport {
            user: profile,
            token: TokenPair {
                session_id: session.id,
                access_token,
                refresh_token: new_refresh_token,
            },
        })
    }

    /// Deletes a session row by id.
    ///
    /// The id has already been authenticated upstream via access-token
    /// validation, so no token check happens here.
    pub async fn sign_out(&self, session_id: Uuid) -> AppResult<()> {
        self.sessions.delete(session_id).await?;
        info!(session_id = %session_id, "Signed out");
        Ok(())
    }

    /// Validates an access token for a single request.
    ///
    /// The signature/expiry check is only a first pass; the store must still
    /// hold the exact (user, token) pair, so sign-out and refresh revoke
    /// outstanding access tokens immediately.
    pub async fn validate_access(&self, access_token: &str) -> AppResult<UserClaims> {
        let token_claims = self.codec.verify(TokenKind::Access, access_token)?;
        let claims = token_claims
            .claims
            .ok_or_else(|| AppError::authentication("claims type is invalid"))?;

        if !self
            .sessions
            .find_by_user_and_access_token(claims.id, access_token)
            .await
        {
            return Err(AppError::authentication("access token is invalid"));
        }

        Ok(claims)
    }

    /// Registers a new customer account. The password is hashed before it
    /// reaches the store.
    pub async fn register_customer(&self, req: &RegisterRequest) -> AppResult<User> {
        self.register(req, ROLE_CUSTOMER).await
    }

    /// Registers a new admin account.
    pub async fn register_admin(&self, req: &RegisterRequest) -> AppResult<User> {
        self.register(req, ROLE_ADMIN).await
    }

    async fn register(&self, req: &RegisterRequest, role_id: i32) -> AppResult<User> {
        req.check()?;
        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .users
            .insert_user(&req.email, &req.username, &password_hash, role_id)
            .await?;
        info!(user_id = %user.id, role_id, "User registered");
        Ok(user)
    }

    /// Loads a user's profile by id.
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<User> {
        self.users
            .find_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("user not found"))
    }

    /// Mints a claims-less admin token (300 s) for privileged bootstrap
    /// endpoints.
    pub fn generate_admin_token(&self) -> AppResult<String> {
        self.codec.issue(TokenKind::Admin, None)
    }

    /// Mints a claims-less api-key token (2 years) consumed by the outer
    /// pipeline's api-key gate.
    pub fn generate_api_key(&self) -> AppResult<String> {
        self.codec.issue(TokenKind::ApiKey, None)
    }
}
