//! Issued token pair and the passport returned to clients.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::User;

/// The signed token values handed to a client, tied to a session row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// The session row these tokens are persisted under.
    pub session_id: Uuid,
    /// Signed access token.
    pub access_token: String,
    /// Signed refresh token.
    pub refresh_token: String,
}

/// The pair of user profile and tokens returned after a successful sign-in
/// or refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passport {
    /// The authenticated user's profile.
    pub user: User,
    /// The issued token pair.
    pub token: TokenPair,
}
