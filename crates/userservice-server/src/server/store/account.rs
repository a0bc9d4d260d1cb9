use mongodb::bson::{DateTime, Document, doc};
use serde::{Deserialize, Serialize};
use userservice_core::Registration;

/// A persisted account document.
///
/// `password_hash` holds whatever credential material the caller submitted at
/// registration; no hashing is applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub full_name: String,
    pub user_name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Account {
    /// Builds a fresh account from validated fields, stamped with the current
    /// time.
    pub fn new(registration: Registration, password_hash: String) -> Self {
        let now = DateTime::now();
        Self {
            full_name: registration.full_name,
            user_name: registration.user_name,
            email: registration.email,
            phone: registration.phone,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Identity fields to probe for. An account matches when any field that is
/// set equals the stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentityQuery {
    pub email: Option<String>,
    pub user_name: Option<String>,
    pub phone: Option<String>,
}

impl IdentityQuery {
    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Probe for any of the three identity fields of a registration.
    pub fn any_of(registration: &Registration) -> Self {
        Self {
            email: Some(registration.email.clone()),
            user_name: Some(registration.user_name.clone()),
            phone: Some(registration.phone.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.user_name.is_none() && self.phone.is_none()
    }

    pub fn matches(&self, account: &Account) -> bool {
        self.email.as_deref() == Some(account.email.as_str())
            || self.user_name.as_deref() == Some(account.user_name.as_str())
            || self.phone.as_deref() == Some(account.phone.as_str())
    }

    /// `$or` filter over the fields that are set.
    pub fn to_filter(&self) -> Document {
        let clauses: Vec<Document> = [
            ("email", &self.email),
            ("user_name", &self.user_name),
            ("phone", &self.phone),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            value.as_ref().map(|v| {
                let mut clause = Document::new();
                clause.insert(field, v.as_str());
                clause
            })
        })
        .collect();

        doc! { "$or": clauses }
    }
}
