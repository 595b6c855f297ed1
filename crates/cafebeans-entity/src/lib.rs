//! # cafebeans-entity
//!
//! Domain entity models for the cafe-beans backend. Every struct in this
//! crate represents a database table row or a domain value object. Database
//! entities additionally derive `sqlx::FromRow`.

pub mod role;
pub mod session;
pub mod user;
