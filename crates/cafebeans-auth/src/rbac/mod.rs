//! Role bit-vector authorization.

pub mod authorizer;

pub use authorizer::{RoleAuthorizer, role_bits};
