use super::{Account, AccountStore, IdentityQuery, StoreError};
use parking_lot::Mutex;

/// In-process [`AccountStore`] with the same three unique constraints as the
/// MongoDB collection. Checks and inserts happen under one lock.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: Mutex<Vec<Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.accounts.lock().len()
    }

    pub fn get_by_email(&self, email: &str) -> Option<Account> {
        self.accounts
            .lock()
            .iter()
            .find(|account| account.email == email)
            .cloned()
    }
}

#[tonic::async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_identity(
        &self,
        query: &IdentityQuery,
    ) -> Result<Option<Account>, StoreError> {
        Ok(self
            .accounts
            .lock()
            .iter()
            .find(|account| query.matches(account))
            .cloned())
    }

    async fn insert(&self, account: &Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.lock();
        for existing in accounts.iter() {
            let index = if existing.email == account.email {
                "email_1"
            } else if existing.user_name == account.user_name {
                "user_name_1"
            } else if existing.phone == account.phone {
                "phone_1"
            } else {
                continue;
            };
            return Err(StoreError::DuplicateKey {
                index: Some(index.to_owned()),
            });
        }
        accounts.push(account.clone());
        Ok(())
    }
}
