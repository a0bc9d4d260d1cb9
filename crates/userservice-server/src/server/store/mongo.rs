//! MongoDB-backed [`AccountStore`].
//!
//! Accounts live in a single collection guarded by three single-field unique
//! indexes (`email`, `user_name`, `phone`). They are created idempotently on
//! connect, before the server accepts traffic.

use super::{Account, AccountStore, IdentityQuery, StoreError};
use crate::server::config::StoreConfig;
use mongodb::{
    Client, Collection, IndexModel,
    bson::{Document, doc},
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{ClientOptions, IndexOptions},
};

/// Server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Fields that each carry their own unique index.
const UNIQUE_FIELDS: [&str; 3] = ["email", "user_name", "phone"];

#[derive(Clone, Debug)]
pub struct MongoAccountStore {
    collection: Collection<Account>,
}

impl MongoAccountStore {
    /// Connects, verifies the deployment answers, and provisions the unique
    /// indexes. The whole sequence is bounded by `config.connect_timeout`.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        tokio::time::timeout(config.connect_timeout, Self::establish(config))
            .await
            .map_err(|_| StoreError::Timeout(config.connect_timeout))?
    }

    async fn establish(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(connection_error)?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_owned());
        options.server_selection_timeout = Some(config.connect_timeout);

        let client = Client::with_options(options).map_err(connection_error)?;
        let database = client.database(&config.database);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(connection_error)?;

        let store = Self {
            collection: database.collection(&config.collection),
        };
        store.provision_indexes().await?;

        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "Account store ready"
        );
        Ok(store)
    }

    async fn provision_indexes(&self) -> Result<(), StoreError> {
        let indexes = UNIQUE_FIELDS.map(|field| {
            let mut keys = Document::new();
            keys.insert(field, 1);
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().unique(true).build())
                .build()
        });

        self.collection
            .create_indexes(indexes)
            .await
            .map_err(connection_error)?;
        Ok(())
    }
}

#[tonic::async_trait]
impl AccountStore for MongoAccountStore {
    async fn find_by_identity(
        &self,
        query: &IdentityQuery,
    ) -> Result<Option<Account>, StoreError> {
        // `$or` rejects an empty clause list.
        if query.is_empty() {
            return Ok(None);
        }
        self.collection
            .find_one(query.to_filter())
            .await
            .map_err(query_error)
    }

    async fn insert(&self, account: &Account) -> Result<(), StoreError> {
        match self.collection.insert_one(account).await {
            Ok(_) => Ok(()),
            Err(err) => Err(duplicate_key(&err).unwrap_or_else(|| query_error(err))),
        }
    }
}

fn connection_error(err: MongoError) -> StoreError {
    StoreError::Connection {
        message: err.to_string(),
    }
}

fn query_error(err: MongoError) -> StoreError {
    StoreError::Query {
        message: err.to_string(),
    }
}

/// Classifies `err` as a unique index violation, if it is one.
fn duplicate_key(err: &MongoError) -> Option<StoreError> {
    let message = match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY_CODE => {
            &write.message
        }
        ErrorKind::Command(command) if command.code == DUPLICATE_KEY_CODE => &command.message,
        _ => return None,
    };
    Some(StoreError::DuplicateKey {
        index: index_name(message),
    })
}

/// Pulls the index name out of an `E11000 ... index: <name> dup key: ...`
/// message.
fn index_name(message: &str) -> Option<String> {
    let (_, rest) = message.split_once("index: ")?;
    rest.split_whitespace().next().map(str::to_owned)
}
