//! Declarative per-operation role policies.
//!
//! Each protected operation declares the roles allowed to invoke it as
//! `const` data next to its handler; one shared routine enforces the check.
//! A policy mismatch is Forbidden, distinct from unauthenticated: the
//! caller has proven who they are but lacks permission.

use tracing::warn;

use crate::claims::{AccessClaims, Role};
use crate::error::AppError;

#[derive(Debug, Clone, Copy)]
pub struct RolePolicy {
    allowed: &'static [Role],
}

impl RolePolicy {
    pub const fn allow(allowed: &'static [Role]) -> Self {
        Self { allowed }
    }

    /// Enforce the policy against verified claims. Must run before any
    /// state-mutating or data-returning work begins.
    pub fn require(&self, claims: &AccessClaims) -> Result<(), AppError> {
        if self.allowed.contains(&claims.role) {
            return Ok(());
        }
        warn!(
            sub = %claims.sub,
            role = %claims.role,
            "role not permitted for this operation"
        );
        Err(AppError::forbidden())
    }
}
