//! Role entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A role row. Read-only reference data; the live role count determines the
/// bit width used by the authorizer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Role identifier (1 = customer, 2 = admin).
    pub id: i32,
    /// Human-readable role title.
    pub title: String,
}
