//! Role reference data.

pub mod model;

pub use model::Role;
