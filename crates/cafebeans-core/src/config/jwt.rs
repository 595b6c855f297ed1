//! Token signing configuration.

use serde::{Deserialize, Serialize};

/// Signing keys and lifetimes for the four token kinds.
///
/// Access and refresh tokens share `secret_key`; admin and api-key tokens
/// each use their own key so a forged admin token cannot be produced from
/// the user-facing secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// HMAC secret for access and refresh tokens.
    #[serde(default = "default_secret")]
    pub secret_key: String,
    /// HMAC secret for admin tokens.
    #[serde(default = "default_secret")]
    pub admin_key: String,
    /// HMAC secret for api-key tokens.
    #[serde(default = "default_secret")]
    pub api_key: String,
    /// Access token lifetime in seconds.
    #[serde(default = "default_access_expires")]
    pub access_expires_seconds: i64,
    /// Refresh token lifetime in seconds.
    #[serde(default = "default_refresh_expires")]
    pub refresh_expires_seconds: i64,
}

fn default_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_expires() -> i64 {
    3600
}

fn default_refresh_expires() -> i64 {
    86400
}
