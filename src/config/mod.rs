//! Service Configuration Module
//!
//! Configuration is loaded once at startup and passed explicitly to the
//! components that need it (stage clients, store, HTTP server). There is no
//! global configuration state.
//!
//! ## Loading Order
//!
//! 1. `COMPLAINT_OPS_CONFIG` environment variable (path to TOML file)
//! 2. `complaint_ops.toml` in the current working directory
//! 3. Built-in defaults
//!
//! Environment overrides (`COMPLAINT_OPS_SERVER_ADDR`,
//! `COMPLAINT_OPS_CORS_ORIGINS`, `AI_SERVICE_URL`) are applied on top, then
//! CLI flags in `main.rs`, then `validate()` runs once on the result.

mod app_config;
pub mod defaults;

pub use app_config::*;
