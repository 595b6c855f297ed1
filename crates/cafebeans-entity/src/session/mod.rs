//! Session (oauth) entities and issued token values.

pub mod model;
pub mod token;

pub use model::OauthSession;
pub use token::{Passport, TokenPair};
