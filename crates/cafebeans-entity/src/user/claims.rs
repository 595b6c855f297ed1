//! Claims payload embedded in signed tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The user identity carried inside access and refresh tokens.
///
/// Admin and api-key tokens carry no user claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    /// The user this token was issued to.
    pub id: Uuid,
    /// The user's role at issuance time.
    pub role_id: i32,
}
