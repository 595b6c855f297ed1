//! End-to-end session flow tests against in-memory stores.

mod common;

use std::sync::Arc;

use cafebeans_auth::{
    JwtCodec, PasswordHasher, RoleAuthorizer, SessionManager, TokenKind, UserStore,
};
use cafebeans_core::config::jwt::JwtConfig;
use cafebeans_core::error::ErrorKind;
use cafebeans_entity::user::RegisterRequest;

use common::{MockRoleStore, MockSessionStore, MockUserStore};

fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret_key: "user-secret".to_string(),
        admin_key: "admin-secret".to_string(),
        api_key: "api-key-secret".to_string(),
        access_expires_seconds: 3600,
        refresh_expires_seconds: 86_400,
    }
}

struct Harness {
    manager: SessionManager,
    users: Arc<MockUserStore>,
    sessions: Arc<MockSessionStore>,
    codec: JwtCodec,
}

fn harness() -> Harness {
    let config = test_jwt_config();
    let users = Arc::new(MockUserStore::new());
    let sessions = Arc::new(MockSessionStore::new());
    let manager = SessionManager::new(
        JwtCodec::new(&config),
        PasswordHasher::new(),
        users.clone(),
        sessions.clone(),
    );
    Harness {
        manager,
        users,
        sessions,
        codec: JwtCodec::new(&config),
    }
}

/// Seed a customer with the given plaintext password.
fn seed_customer(h: &Harness, email: &str, password: &str) {
    let hash = PasswordHasher::new().hash_password(password).unwrap();
    h.users.seed(email, "barista", &hash, 1);
}

#[tokio::test]
async fn sign_in_persists_matching_session_row() {
    let h = harness();
    seed_customer(&h, "ana@cafe.test", "espresso-123");

    let passport = h.manager.sign_in("ana@cafe.test", "espresso-123").await.unwrap();

    assert_eq!(passport.user.email, "ana@cafe.test");
    assert_eq!(passport.user.role_id, 1);

    let stored = h.sessions.get(passport.token.session_id).unwrap();
    assert_eq!(stored.user_id, passport.user.id);
    assert_eq!(stored.access_token, passport.token.access_token);
    assert_eq!(stored.refresh_token, passport.token.refresh_token);
}

#[tokio::test]
async fn sign_in_unknown_email_is_not_found() {
    let h = harness();

    let err = h
        .manager
        .sign_in("nobody@cafe.test", "espresso-123")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.message, "user not found");
    assert_eq!(h.sessions.len(), 0);
}

#[tokio::test]
async fn sign_in_wrong_password_is_rejected() {
    let h = harness();
    seed_customer(&h, "ana@cafe.test", "espresso-123");

    let err = h
        .manager
        .sign_in("ana@cafe.test", "wrong-password")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(err.message, "password is incorrect");
    assert_eq!(h.sessions.len(), 0);
}

#[tokio::test]
async fn refresh_rotates_tokens_and_preserves_expiry() {
    let h = harness();
    seed_customer(&h, "ana@cafe.test", "espresso-123");

    let passport = h.manager.sign_in("ana@cafe.test", "espresso-123").await.unwrap();
    let original_exp = h
        .codec
        .verify(TokenKind::Refresh, &passport.token.refresh_token)
        .unwrap()
        .exp;

    let refreshed = h.manager.refresh(&passport.token.refresh_token).await.unwrap();

    assert_eq!(refreshed.token.session_id, passport.token.session_id);
    assert_ne!(refreshed.token.access_token, passport.token.access_token);

    // The rotated refresh token keeps the original expiry instant.
    let rotated_exp = h
        .codec
        .verify(TokenKind::Refresh, &refreshed.token.refresh_token)
        .unwrap()
        .exp;
    assert_eq!(rotated_exp, original_exp);

    // A second rotation still pins the same instant.
    let refreshed_again = h.manager.refresh(&refreshed.token.refresh_token).await.unwrap();
    let exp_again = h
        .codec
        .verify(TokenKind::Refresh, &refreshed_again.token.refresh_token)
        .unwrap()
        .exp;
    assert_eq!(exp_again, original_exp);

    // The store holds exactly the latest pair.
    let stored = h.sessions.get(passport.token.session_id).unwrap();
    assert_eq!(stored.access_token, refreshed_again.token.access_token);
    assert_eq!(stored.refresh_token, refreshed_again.token.refresh_token);
}

#[tokio::test]
async fn refresh_with_rotated_out_token_is_rejected() {
    let h = harness();
    seed_customer(&h, "ana@cafe.test", "espresso-123");

    let passport = h.manager.sign_in("ana@cafe.test", "espresso-123").await.unwrap();
    let _ = h.manager.refresh(&passport.token.refresh_token).await.unwrap();

    // The pre-rotation token is still validly signed but no longer stored.
    let err = h
        .manager
        .refresh(&passport.token.refresh_token)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.message, "oauth not found");
}

#[tokio::test]
async fn refresh_with_garbage_token_fails_verification() {
    let h = harness();

    let err = h.manager.refresh("not-a-token").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(err.message, "token format is invalid");
}

#[tokio::test]
async fn validate_access_returns_claims_for_live_session() {
    let h = harness();
    seed_customer(&h, "ana@cafe.test", "espresso-123");

    let passport = h.manager.sign_in("ana@cafe.test", "espresso-123").await.unwrap();
    let claims = h
        .manager
        .validate_access(&passport.token.access_token)
        .await
        .unwrap();

    assert_eq!(claims.id, passport.user.id);
    assert_eq!(claims.role_id, 1);
}

#[tokio::test]
async fn sign_out_revokes_outstanding_access_token() {
    let h = harness();
    seed_customer(&h, "ana@cafe.test", "espresso-123");

    let passport = h.manager.sign_in("ana@cafe.test", "espresso-123").await.unwrap();
    h.manager.sign_out(passport.token.session_id).await.unwrap();

    // The token is still validly signed, but its session row is gone.
    let err = h
        .manager
        .validate_access(&passport.token.access_token)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(err.message, "access token is invalid");
}

#[tokio::test]
async fn sign_out_of_unknown_session_is_not_found() {
    let h = harness();

    let err = h.manager.sign_out(uuid::Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.message, "oauth not found");
}

#[tokio::test]
async fn refresh_invalidates_previous_access_token() {
    let h = harness();
    seed_customer(&h, "ana@cafe.test", "espresso-123");

    let passport = h.manager.sign_in("ana@cafe.test", "espresso-123").await.unwrap();
    let refreshed = h.manager.refresh(&passport.token.refresh_token).await.unwrap();

    assert!(
        h.manager
            .validate_access(&passport.token.access_token)
            .await
            .is_err()
    );
    assert!(
        h.manager
            .validate_access(&refreshed.token.access_token)
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn register_then_sign_in() {
    let h = harness();

    let req = RegisterRequest {
        email: "ana@cafe.test".to_string(),
        username: "ana".to_string(),
        password: "espresso-123".to_string(),
    };
    let user = h.manager.register_customer(&req).await.unwrap();
    assert_eq!(user.role_id, 1);

    let passport = h.manager.sign_in("ana@cafe.test", "espresso-123").await.unwrap();
    assert_eq!(passport.user.id, user.id);
}

#[tokio::test]
async fn register_admin_gets_admin_role() {
    let h = harness();

    let req = RegisterRequest {
        email: "boss@cafe.test".to_string(),
        username: "boss".to_string(),
        password: "espresso-123".to_string(),
    };
    let user = h.manager.register_admin(&req).await.unwrap();
    assert_eq!(user.role_id, 2);
}

#[tokio::test]
async fn register_duplicate_email_conflicts() {
    let h = harness();

    let req = RegisterRequest {
        email: "ana@cafe.test".to_string(),
        username: "ana".to_string(),
        password: "espresso-123".to_string(),
    };
    h.manager.register_customer(&req).await.unwrap();

    let dup = RegisterRequest {
        username: "other-ana".to_string(),
        ..req
    };
    let err = h.manager.register_customer(&dup).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(err.message, "email has been used");
}

#[tokio::test]
async fn register_malformed_email_is_rejected_before_storage() {
    let h = harness();

    let req = RegisterRequest {
        email: "not-an-email".to_string(),
        username: "ana".to_string(),
        password: "espresso-123".to_string(),
    };
    let err = h.manager.register_customer(&req).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message, "email is not a valid email address");
    assert!(
        h.users
            .find_by_email("not-an-email")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn get_profile_for_unknown_user_is_not_found() {
    let h = harness();

    let err = h.manager.get_profile(uuid::Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.message, "user not found");
}

#[tokio::test]
async fn minted_admin_and_api_tokens_verify_under_their_own_kinds() {
    let h = harness();

    let admin = h.manager.generate_admin_token().unwrap();
    let verified = h.codec.verify(TokenKind::Admin, &admin).unwrap();
    assert_eq!(verified.claims, None);

    let api_key = h.manager.generate_api_key().unwrap();
    let verified = h.codec.verify(TokenKind::ApiKey, &api_key).unwrap();
    assert_eq!(verified.claims, None);

    // Neither verifies as a user-facing token.
    assert!(h.codec.verify(TokenKind::Access, &admin).is_err());
    assert!(h.codec.verify(TokenKind::Access, &api_key).is_err());
}

#[tokio::test]
async fn authorizer_grants_by_role_bit_overlap() {
    let roles = Arc::new(MockRoleStore::standard());
    let authorizer = RoleAuthorizer::new(roles);

    // Customer hitting a customer endpoint.
    assert!(authorizer.authorize(1, &[1]).await.is_ok());
    // Admin hitting an endpoint open to both roles.
    assert!(authorizer.authorize(2, &[1, 2]).await.is_ok());
    // Customer hitting an admin-only endpoint.
    let err = authorizer.authorize(1, &[2]).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert_eq!(err.message, "no permission to access");
}
