//! Session entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted session row in the `oauth` table, linking a user to their
/// currently valid access and refresh token values.
///
/// One row per sign-in: created on sign-in, token values rotated in place on
/// refresh, deleted on sign-out.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OauthSession {
    /// Session identifier, generated by the store.
    pub id: Uuid,
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// The currently valid access token value.
    pub access_token: String,
    /// The currently valid refresh token value.
    pub refresh_token: String,
}
