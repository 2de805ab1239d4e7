#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Resource service: patient record CRUD behind the token gate.

pub mod config;
pub mod entities;
pub mod infra;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;

// Re-exports for public API
pub use config::Config;
pub use state::AppState;
