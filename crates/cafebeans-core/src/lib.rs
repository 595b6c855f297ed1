//! # cafebeans-core
//!
//! Core crate for the cafe-beans backend. Contains configuration schemas,
//! tracing setup, and the unified error system.
//!
//! This crate has **no** internal dependencies on other cafe-beans crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
