//! PostgreSQL implementations of the store traits.
//!
//! All queries run directly against the pool; no store call spans more than
//! one statement, so atomicity is per call.

use async_trait::async_trait;

use crate::{
    db::DbPool,
    models::{
        account::{Account, NewAccount},
        transaction::{NewTransaction, Transaction},
    },
    repositories::{AccountStore, OperationCatalog, StoreError, TransactionStore},
};

/// Accounts backed by the `accounts` table.
#[derive(Clone)]
pub struct PgAccountStore {
    pool: DbPool,
}

impl PgAccountStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn save(&self, account: &NewAccount) -> Result<Account, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (document_number)
            VALUES ($1)
            RETURNING account_id, document_number
            "#,
        )
        .bind(account.document_number())
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_by_document(&self, document_number: &str) -> Result<Account, StoreError> {
        sqlx::query_as::<_, Account>(
            "SELECT account_id, document_number FROM accounts WHERE document_number = $1",
        )
        .bind(document_number)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn find_by_id(&self, id: i64) -> Result<Account, StoreError> {
        sqlx::query_as::<_, Account>(
            "SELECT account_id, document_number FROM accounts WHERE account_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }
}

/// Transactions backed by the `transactions` table.
#[derive(Clone)]
pub struct PgTransactionStore {
    pool: DbPool,
}

impl PgTransactionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionStore for PgTransactionStore {
    async fn save(&self, transaction: &NewTransaction) -> Result<Transaction, StoreError> {
        // Only the id comes back; every other field is exactly what was written.
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO transactions (account_id, operation_type_id, amount, event_date)
            VALUES ($1, $2, $3, $4)
            RETURNING transaction_id
            "#,
        )
        .bind(transaction.account_id)
        .bind(transaction.operation_type.code())
        .bind(transaction.amount)
        .bind(transaction.event_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(Transaction::from_new(id, transaction))
    }

    async fn find_by_id(&self, id: i64) -> Result<Transaction, StoreError> {
        sqlx::query_as::<_, Transaction>(
            r#"
            SELECT transaction_id, account_id, operation_type_id, amount, event_date
            FROM transactions
            WHERE transaction_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }
}

/// Operation type codes registered in `operations_types`.
#[derive(Clone)]
pub struct PgOperationCatalog {
    pool: DbPool,
}

impl PgOperationCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OperationCatalog for PgOperationCatalog {
    async fn exists(&self, operation_type_id: i16) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM operations_types WHERE operation_type_id = $1)",
        )
        .bind(operation_type_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
