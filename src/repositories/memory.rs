//! In-memory stores for tests.
//!
//! [`InMemoryStore`] behaves like the PostgreSQL schema, constraints
//! included. [`StalledAccounts`] never answers, for deadline tests.

use std::{
    collections::{BTreeMap, HashSet},
    sync::{
        RwLock,
        atomic::{AtomicI64, Ordering},
    },
};

use async_trait::async_trait;

use crate::{
    models::{
        account::{Account, NewAccount},
        operation_type::OperationType,
        transaction::{NewTransaction, Transaction},
    },
    repositories::{AccountStore, OperationCatalog, StoreError, TransactionStore},
};

/// Store that keeps every table in memory and enforces the same
/// constraints as the PostgreSQL schema.
pub struct InMemoryStore {
    accounts: RwLock<BTreeMap<i64, Account>>,
    transactions: RwLock<BTreeMap<i64, Transaction>>,
    operation_types: HashSet<i16>,
    account_seq: AtomicI64,
    transaction_seq: AtomicI64,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Store seeded with the four standard operation types.
    pub fn new() -> Self {
        Self::with_operation_types(OperationType::ALL.iter().map(|op| op.code()))
    }

    pub fn with_operation_types(codes: impl IntoIterator<Item = i16>) -> Self {
        Self {
            accounts: RwLock::new(BTreeMap::new()),
            transactions: RwLock::new(BTreeMap::new()),
            operation_types: codes.into_iter().collect(),
            account_seq: AtomicI64::new(1),
            transaction_seq: AtomicI64::new(1),
        }
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.read().unwrap().len()
    }
}

#[async_trait]
impl AccountStore for InMemoryStore {
    async fn save(&self, account: &NewAccount) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().unwrap();
        if accounts
            .values()
            .any(|a| a.document_number == account.document_number())
        {
            return Err(StoreError::UniqueViolation(sqlx::Error::Protocol(
                "duplicate key value violates unique constraint".to_string(),
            )));
        }

        let id = self.account_seq.fetch_add(1, Ordering::SeqCst);
        let stored = Account {
            id,
            document_number: account.document_number().to_string(),
        };
        accounts.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_document(&self, document_number: &str) -> Result<Account, StoreError> {
        self.accounts
            .read()
            .unwrap()
            .values()
            .find(|a| a.document_number == document_number)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_id(&self, id: i64) -> Result<Account, StoreError> {
        self.accounts
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl TransactionStore for InMemoryStore {
    async fn save(&self, transaction: &NewTransaction) -> Result<Transaction, StoreError> {
        if !self
            .accounts
            .read()
            .unwrap()
            .contains_key(&transaction.account_id)
        {
            return Err(StoreError::ForeignKeyViolation(sqlx::Error::Protocol(
                "insert violates foreign key constraint".to_string(),
            )));
        }

        let id = self.transaction_seq.fetch_add(1, Ordering::SeqCst);
        let stored = Transaction::from_new(id, transaction);
        self.transactions.write().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Transaction, StoreError> {
        self.transactions
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl OperationCatalog for InMemoryStore {
    async fn exists(&self, operation_type_id: i16) -> Result<bool, StoreError> {
        Ok(self.operation_types.contains(&operation_type_id))
    }
}

/// Account store whose calls never complete.
pub struct StalledAccounts;

#[async_trait]
impl AccountStore for StalledAccounts {
    async fn save(&self, _account: &NewAccount) -> Result<Account, StoreError> {
        std::future::pending().await
    }

    async fn find_by_document(&self, _document_number: &str) -> Result<Account, StoreError> {
        std::future::pending().await
    }

    async fn find_by_id(&self, _id: i64) -> Result<Account, StoreError> {
        std::future::pending().await
    }
}
