#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Shared authentication core for the clinic services.
//!
//! Everything both services need to agree on lives here: the token codec,
//! the bearer-token gate middleware, the claims accessor, role policies,
//! and the error taxonomy they surface over HTTP.

pub mod claims;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod policy;
pub mod security;
pub mod telemetry;

// Re-exports for public API
pub use claims::{AccessClaims, Role};
pub use error::{AppError, ErrorCode};
pub use jwt::{issue_access_token, verify_access_token, Claims, TokenError};
pub use middleware::TokenGate;
pub use policy::RolePolicy;
pub use security::SecurityConfig;
