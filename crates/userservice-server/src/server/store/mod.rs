//! Account Store Gateway.
//!
//! [`AccountStore`] is the seam between the handlers and persistence. The
//! production implementation is [`mongo::MongoAccountStore`]; tests use the
//! in-memory store in `memory`.
//!
//! Uniqueness of email, user name and phone is owned by the store: each
//! implementation must reject an insert that collides on any one of them with
//! [`StoreError::DuplicateKey`], independently of any prior
//! [`AccountStore::find_by_identity`] probe.

pub mod account;
#[cfg(test)]
pub mod memory;
pub mod mongo;

pub use account::{Account, IdentityQuery};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A unique index rejected the write.
    #[error("duplicate key on index {}", index.as_deref().unwrap_or("<unknown>"))]
    DuplicateKey { index: Option<String> },

    /// A read or write failed for any other reason.
    #[error("store query failed: {message}")]
    Query { message: String },

    /// The deployment could not be reached or the indexes not provisioned.
    #[error("store connection failed: {message}")]
    Connection { message: String },

    /// Startup did not complete within the configured bound.
    #[error("store did not become ready within {0:?}")]
    Timeout(core::time::Duration),
}

#[tonic::async_trait]
pub trait AccountStore: Send + Sync {
    /// Returns the first account matching any field set on `query`.
    async fn find_by_identity(&self, query: &IdentityQuery)
    -> Result<Option<Account>, StoreError>;

    /// Persists a new account.
    async fn insert(&self, account: &Account) -> Result<(), StoreError>;
}
