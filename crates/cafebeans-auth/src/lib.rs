//! # cafebeans-auth
//!
//! Authentication, authorization, and session lifecycle for the cafe-beans
//! backend.
//!
//! ## Modules
//!
//! - `jwt` — signing and verification of the four token kinds
//! - `password` — Argon2id password hashing and verification
//! - `rbac` — role bit-vector authorization
//! - `session` — session lifecycle management (sign-in, refresh, sign-out)
//! - `traits` — store capability interfaces consumed by the session manager
//! - `store` — SQL-backed implementations of the store traits

pub mod jwt;
pub mod password;
pub mod rbac;
pub mod session;
pub mod store;
pub mod traits;

pub use jwt::{JwtCodec, TokenClaims, TokenKind};
pub use password::PasswordHasher;
pub use rbac::RoleAuthorizer;
pub use session::SessionManager;
pub use traits::{RoleStore, SessionStore, UserStore};
