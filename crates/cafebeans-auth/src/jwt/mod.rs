//! Signing and verification of the four session token kinds.

pub mod claims;
pub mod codec;

pub use claims::{TokenClaims, TokenKind};
pub use codec::JwtCodec;
