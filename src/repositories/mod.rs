//! Persistence collaborators used by the services.
//!
//! Each store is a trait so services can be wired against PostgreSQL in
//! production and against in-memory or mock stores in tests. Lookups that
//! find nothing return [`StoreError::NotFound`]; they never return an empty
//! success.

use async_trait::async_trait;

use crate::models::{
    account::{Account, NewAccount},
    transaction::{NewTransaction, Transaction},
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

/// Failure reported by a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The lookup matched no row.
    #[error("record not found")]
    NotFound,

    /// A unique constraint rejected the write.
    #[error("unique constraint violated")]
    UniqueViolation(#[source] sqlx::Error),

    /// A foreign key rejected the write (the referenced row is missing).
    #[error("foreign key constraint violated")]
    ForeignKeyViolation(#[source] sqlx::Error),

    /// Anything else: connectivity, pool timeouts, unexpected SQL errors.
    #[error("database error")]
    Database(#[source] sqlx::Error),
}

/// Classify raw sqlx errors.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if matches!(err, sqlx::Error::RowNotFound) {
            return StoreError::NotFound;
        }

        let (unique, foreign_key) = err
            .as_database_error()
            .map(|db_err| (db_err.is_unique_violation(), db_err.is_foreign_key_violation()))
            .unwrap_or_default();

        if unique {
            StoreError::UniqueViolation(err)
        } else if foreign_key {
            StoreError::ForeignKeyViolation(err)
        } else {
            StoreError::Database(err)
        }
    }
}

/// Account persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a validated account and return it with its assigned id.
    async fn save(&self, account: &NewAccount) -> Result<Account, StoreError>;

    async fn find_by_document(&self, document_number: &str) -> Result<Account, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Account, StoreError>;
}

/// Transaction persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Insert a normalized transaction and return it with its assigned id.
    async fn save(&self, transaction: &NewTransaction) -> Result<Transaction, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Transaction, StoreError>;
}

/// Registered operation type codes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OperationCatalog: Send + Sync {
    async fn exists(&self, operation_type_id: i16) -> Result<bool, StoreError>;
}
