//! User entity models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use cafebeans_core::AppError;

/// A user profile as returned to clients. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Email address used for sign-in.
    pub email: String,
    /// Display username.
    pub username: String,
    /// Role reference (1 = customer, 2 = admin).
    pub role_id: i32,
}

/// The credential row read during sign-in. Read from storage only, never
/// constructed by the auth core.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentialRecord {
    /// Unique user identifier.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Argon2 password hash.
    pub password_hash: String,
    /// Display username.
    pub username: String,
    /// Role reference.
    pub role_id: i32,
}

impl UserCredentialRecord {
    /// Project the credential row onto the client-facing profile.
    pub fn into_profile(self) -> User {
        User {
            id: self.id,
            email: self.email,
            username: self.username,
            role_id: self.role_id,
        }
    }
}

/// Payload for registering a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address; must be well-formed.
    #[validate(email)]
    pub email: String,
    /// Desired username.
    #[validate(length(min = 1))]
    pub username: String,
    /// Plaintext password; hashed before it ever reaches storage.
    pub password: String,
}

impl RegisterRequest {
    /// Validate the request, surfacing the original sign-up error message.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()
            .map_err(|_| AppError::validation("email is not a valid email address"))
    }
}
