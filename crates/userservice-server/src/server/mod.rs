//! Server-side components of the account service.
//!
//! ## Submodules
//!
//! - [`config`] - CLI/environment configuration.
//! - [`service`] - Register and Login handlers.
//! - [`store`] - Account Store Gateway and its MongoDB implementation.
//! - [`telemetry`] - Logging and optional OpenTelemetry export.

pub mod config;
pub mod service;
pub mod store;
pub mod telemetry;
