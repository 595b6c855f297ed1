//! JWT issuance and verification with per-kind secrets and lifetimes.

use chrono::{Months, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use cafebeans_core::config::jwt::JwtConfig;
use cafebeans_core::error::AppError;
use cafebeans_core::result::AppResult;
use cafebeans_entity::user::UserClaims;

use super::claims::{ISSUER, TokenClaims, TokenKind};

/// Admin token lifetime in seconds.
const ADMIN_EXPIRES_SECONDS: i64 = 300;

/// Signs and verifies the four token kinds.
///
/// Access and refresh tokens share one secret; admin and api-key tokens each
/// use their own, so a forged admin token cannot be produced from the user
/// secret.
#[derive(Clone)]
pub struct JwtCodec {
    user_encoding: EncodingKey,
    user_decoding: DecodingKey,
    admin_encoding: EncodingKey,
    admin_decoding: DecodingKey,
    api_encoding: EncodingKey,
    api_decoding: DecodingKey,
    access_expires_seconds: i64,
    refresh_expires_seconds: i64,
}

impl std::fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCodec")
            .field("access_expires_seconds", &self.access_expires_seconds)
            .field("refresh_expires_seconds", &self.refresh_expires_seconds)
            .finish_non_exhaustive()
    }
}

impl JwtCodec {
    /// Create a codec from token configuration.
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            user_encoding: EncodingKey::from_secret(config.secret_key.as_bytes()),
            user_decoding: DecodingKey::from_secret(config.secret_key.as_bytes()),
            admin_encoding: EncodingKey::from_secret(config.admin_key.as_bytes()),
            admin_decoding: DecodingKey::from_secret(config.admin_key.as_bytes()),
            api_encoding: EncodingKey::from_secret(config.api_key.as_bytes()),
            api_decoding: DecodingKey::from_secret(config.api_key.as_bytes()),
            access_expires_seconds: config.access_expires_seconds,
            refresh_expires_seconds: config.refresh_expires_seconds,
        }
    }

    /// Issue a signed token of the given kind.
    ///
    /// `claims` must be present for access/refresh tokens and absent for
    /// admin/api-key tokens; the codec stamps issuer, subject, audience, and
    /// the kind's lifetime.
    pub fn issue(&self, kind: TokenKind, claims: Option<UserClaims>) -> AppResult<String> {
        let now = Utc::now();
        let exp = match kind {
            TokenKind::Access => now.timestamp() + self.access_expires_seconds,
            TokenKind::Refresh => now.timestamp() + self.refresh_expires_seconds,
            TokenKind::Admin => now.timestamp() + ADMIN_EXPIRES_SECONDS,
            // Two calendar years, matching the api-key issuance policy.
            TokenKind::ApiKey => now
                .checked_add_months(Months::new(24))
                .map(|t| t.timestamp())
                .unwrap_or_else(|| now.timestamp() + 2 * 365 * 86_400),
        };
        self.sign(kind, claims, exp)
    }

    /// Re-issue a refresh token carrying fresh claims but the *original*
    /// expiry instant.
    ///
    /// Used during rotation so that repeated refreshes never extend the
    /// total session lifetime.
    pub fn repeat_refresh(&self, claims: UserClaims, exp: i64) -> AppResult<String> {
        self.sign(TokenKind::Refresh, Some(claims), exp)
    }

    /// Verify a signed token of the given kind and return its payload.
    pub fn verify(&self, kind: TokenKind, token: &str) -> AppResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_nbf = true;
        validation.validate_aud = false;

        decode::<TokenClaims>(token, self.decoding_key(kind), &validation)
            .map(|data| data.claims)
            .map_err(map_parse_error)
    }

    fn sign(&self, kind: TokenKind, claims: Option<UserClaims>, exp: i64) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let payload = TokenClaims {
            claims,
            iss: ISSUER.to_string(),
            sub: kind.subject().to_string(),
            aud: kind.audience().iter().map(|s| s.to_string()).collect(),
            jti: Uuid::new_v4(),
            exp,
            nbf: now,
            iat: now,
        };

        encode(&Header::default(), &payload, self.encoding_key(kind))
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    fn encoding_key(&self, kind: TokenKind) -> &EncodingKey {
        match kind {
            TokenKind::Access | TokenKind::Refresh => &self.user_encoding,
            TokenKind::Admin => &self.admin_encoding,
            TokenKind::ApiKey => &self.api_encoding,
        }
    }

    fn decoding_key(&self, kind: TokenKind) -> &DecodingKey {
        match kind {
            TokenKind::Access | TokenKind::Refresh => &self.user_decoding,
            TokenKind::Admin => &self.admin_decoding,
            TokenKind::ApiKey => &self.api_decoding,
        }
    }
}

/// Map a jsonwebtoken failure onto the stable verification error messages.
fn map_parse_error(e: jsonwebtoken::errors::Error) -> AppError {
    use jsonwebtoken::errors::ErrorKind;

    match e.kind() {
        ErrorKind::InvalidAlgorithm => AppError::authentication("signing method is invalid"),
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) => {
            AppError::authentication("token format is invalid")
        }
        ErrorKind::ExpiredSignature => AppError::authentication("token had expired"),
        _ => AppError::authentication(format!("parse token failed: {e}")),
    }
}
