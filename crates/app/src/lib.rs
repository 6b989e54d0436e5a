//! Application wiring: configuration, request contexts, and startup.
//!
//! Transport (HTTP routing, token decoding) sits outside this crate; callers
//! hand in already-verified contexts or claims.

pub mod authz;
pub mod config;
pub mod context;
pub mod services;

pub use config::{AppConfig, ConfigError};
pub use services::AppServices;
