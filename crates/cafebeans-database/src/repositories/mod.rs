//! Repository implementations for the cafe-beans entities.

pub mod oauth;
pub mod role;
pub mod user;

pub use oauth::OauthRepository;
pub use role::RoleRepository;
pub use user::UserRepository;
