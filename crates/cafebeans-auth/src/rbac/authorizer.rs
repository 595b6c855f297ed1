//! Role authorization via fixed-width bit vectors.
//!
//! The bit width is the live number of rows in the roles table, so adding a
//! role widens every check without a deploy. The construction below is
//! deliberate legacy behavior: values are laid out MSB-first by repeated
//! mod-2/div-2, and a check passes only where both vectors hold a literal 1
//! at the same index. Callers may rely on the truncation of values that do
//! not fit the width, so do not replace this with a plain bitmask test.

use std::sync::Arc;

use cafebeans_core::error::AppError;
use cafebeans_core::result::AppResult;

use crate::traits::RoleStore;

/// Render `number` as an MSB-first bit vector of exactly `bits` entries.
///
/// Bits are written lowest-order first from the tail of the vector; when the
/// vector is full, remaining high-order bits are dropped.
pub fn role_bits(mut number: i32, bits: usize) -> Vec<u8> {
    let mut result = vec![0u8; bits];
    let mut idx = bits;

    while number > 0 && idx > 0 {
        result[idx - 1] = (number % 2) as u8;
        number /= 2;
        idx -= 1;
    }
    result
}

/// True iff some index holds a 1 in both vectors.
fn bits_overlap(user: &[u8], required: &[u8]) -> bool {
    user.iter()
        .zip(required.iter())
        .any(|(u, r)| *u == 1 && *r == 1)
}

/// Evaluates whether a caller's role satisfies an endpoint's required-role
/// set.
#[derive(Clone)]
pub struct RoleAuthorizer {
    /// Role reference data; its row count sets the bit width.
    roles: Arc<dyn RoleStore>,
}

impl RoleAuthorizer {
    /// Create an authorizer backed by the given role store.
    pub fn new(roles: Arc<dyn RoleStore>) -> Self {
        Self { roles }
    }

    /// Check the caller's role id against the required role ids.
    ///
    /// The failure carries no detail about which roles were expected.
    pub async fn authorize(
        &self,
        user_role_id: i32,
        required_role_ids: &[i32],
    ) -> AppResult<()> {
        let roles = self.roles.list_roles().await?;
        let width = roles.len();

        let sum: i32 = required_role_ids.iter().sum();
        let user_bits = role_bits(user_role_id, width);
        let required_bits = role_bits(sum, width);

        if bits_overlap(&user_bits, &required_bits) {
            Ok(())
        } else {
            Err(AppError::authorization("no permission to access"))
        }
    }
}

impl std::fmt::Debug for RoleAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleAuthorizer").finish_non_exhaustive()
    }
}
