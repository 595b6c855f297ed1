//! Token kinds and the signed claims payload.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cafebeans_entity::user::UserClaims;

/// Issuer stamped into every signed token.
pub const ISSUER: &str = "cafe-beans-api";

/// The four token kinds. The kind determines the signing secret, the
/// lifetime policy, and the subject/audience metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    /// Short-lived token attached to every authenticated request.
    Access,
    /// Longer-lived token exchanged for a fresh pair.
    Refresh,
    /// Claims-less token for privileged bootstrap endpoints, fixed 300 s.
    Admin,
    /// Claims-less token gating the public API surface, fixed 2 years.
    ApiKey,
}

impl TokenKind {
    /// The subject string stamped into tokens of this kind.
    pub fn subject(&self) -> &'static str {
        match self {
            Self::Access => "access-token",
            Self::Refresh => "refresh-token",
            Self::Admin => "admin-token",
            Self::ApiKey => "api-key",
        }
    }

    /// The audience set stamped into tokens of this kind.
    pub fn audience(&self) -> &'static [&'static str] {
        match self {
            Self::Access | Self::Refresh => &["customers", "admin"],
            Self::Admin => &["admin"],
            Self::ApiKey => &["admin", "customer"],
        }
    }
}

/// The full signed payload: optional user claims plus registered claims.
///
/// Immutable once signed; rotation always signs a new value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User identity, absent for admin and api-key tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claims: Option<UserClaims>,
    /// Issuer, always [`ISSUER`].
    pub iss: String,
    /// Per-kind subject tag.
    pub sub: String,
    /// Per-kind audience set.
    pub aud: Vec<String>,
    /// Unique token id. HS256 signing is deterministic and timestamps are
    /// whole seconds, so without this two tokens signed in the same second
    /// would be byte-identical and rotation would rotate nothing.
    pub jti: Uuid,
    /// Expiry (seconds since epoch).
    pub exp: i64,
    /// Not valid before (seconds since epoch).
    pub nbf: i64,
    /// Issued at (seconds since epoch).
    pub iat: i64,
}
