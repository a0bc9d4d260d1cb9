//! Shared types and error definitions used by the server and its clients.
//!
//! ## Submodules
//!
//! - [`error`] - Service error taxonomy and its gRPC status mapping.
//! - [`validation`] - Identity-field normalization and registration rules.

pub mod error;
pub mod validation;

pub use error::{Error, Result};
pub use validation::{Registration, ValidationError};
