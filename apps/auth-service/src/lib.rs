#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Identity service: signup, login, and access token issuance.

pub mod config;
pub mod entities;
pub mod infra;
pub mod password;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;

// Re-exports for public API
pub use config::Config;
pub use state::AppState;
