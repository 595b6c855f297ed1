//! User entities and token claims.

pub mod claims;
pub mod model;

pub use claims::UserClaims;
pub use model::{RegisterRequest, User, UserCredentialRecord};
