//! Error types for the account service.
//!
//! [`Error`] is the boundary taxonomy every handler resolves to. It implements
//! `From<Error>` for `tonic::Status`, so handlers can propagate it with `?` or
//! `.into()` and clients receive a stable status code.
//!
//! ## Error Cases
//! - `Validation`: The submitted registration broke one of the input rules.
//!   The rule's message is returned verbatim.
//! - `Conflict`: An account already owns one of the identity fields.
//! - `NotFound`: No account matched. The message is deliberately generic.
//! - `Internal`: The store failed. Only a sanitized context string crosses the
//!   boundary; the cause is logged server-side.

use crate::ValidationError;
use tonic::Status;

pub type Result<T> = core::result::Result<T, Error>;

/// Message returned when the uniqueness probe finds an existing account.
pub const ACCOUNT_EXISTS: &str = "user with this email, username or phone already exists";

/// Message returned when the store's unique index rejects an insert.
pub const DUPLICATE_ACCOUNT: &str = "user with these details already exists";

/// Message returned for every login miss.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Unified error type for the account service.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The registration input was malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An identity field is already registered.
    #[error("{reason}")]
    Conflict { reason: String },

    /// No matching account.
    #[error("{reason}")]
    NotFound { reason: String },

    /// Unexpected store failure; `context` is safe to show to callers.
    #[error("{context}")]
    Internal { context: String },
}

impl Error {
    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::NotFound {
            reason: reason.into(),
        }
    }

    pub fn internal(context: impl Into<String>) -> Self {
        Self::Internal {
            context: context.into(),
        }
    }

    /// Whether a caller may succeed by retrying the same request later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(rule) => Status::invalid_argument(rule.to_string()),
            Error::Conflict { reason } => Status::already_exists(reason),
            Error::NotFound { reason } => Status::not_found(reason),
            Error::Internal { context } => Status::internal(context),
        }
    }
}
