//! Transaction service - Core business logic for posting transactions.
//!
//! Posting runs as a fixed pipeline. Each stage either advances or ends
//! the request with a specific error:
//!
//! 1. Resolve the account
//! 2. Confirm the operation type is registered
//! 3. Validate and normalize the amount sign
//! 4. Persist
//!
//! The transaction row is written once, at stage 4, or not at all. No stage
//! is retried; deadlines and retries belong to the caller.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    error::{
        AppError, DomainError, MSG_ACCOUNT_ID_DOES_NOT_EXIST, MSG_CREATE_TRANSACTION_FAILED,
        MSG_DATABASE_ERROR, MSG_OPERATION_TYPE_INVALID, MSG_TRANSACTION_NOT_FOUND,
    },
    models::transaction::{NewTransaction, Transaction},
    repositories::{AccountStore, OperationCatalog, StoreError, TransactionStore},
};

/// Orchestrates transaction posting and lookup.
#[derive(Clone)]
pub struct TransactionService {
    accounts: Arc<dyn AccountStore>,
    transactions: Arc<dyn TransactionStore>,
    operations: Arc<dyn OperationCatalog>,
}

impl TransactionService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        transactions: Arc<dyn TransactionStore>,
        operations: Arc<dyn OperationCatalog>,
    ) -> Self {
        Self {
            accounts,
            transactions,
            operations,
        }
    }

    /// Post a transaction against an account.
    ///
    /// # Arguments
    ///
    /// * `account_id` - Account to post against; must already exist
    /// * `operation_type_id` - Operation code; must be registered in the catalog
    /// * `amount` - Positive magnitude; the stored sign comes from the operation type
    ///
    /// # Returns
    ///
    /// The stored transaction, carrying its assigned id and the exact signed
    /// amount and event date it was built with.
    ///
    /// # Errors
    ///
    /// - `Validation`: unknown account, unregistered or invalid operation type,
    ///   non-positive amount
    /// - `Internal`: a store or catalog call failed
    #[tracing::instrument(skip(self))]
    pub async fn create_transaction(
        &self,
        account_id: i64,
        operation_type_id: i16,
        amount: Decimal,
    ) -> Result<Transaction, AppError> {
        match self.accounts.find_by_id(account_id).await {
            Ok(_) => {}
            Err(StoreError::NotFound) => {
                return Err(AppError::validation(MSG_ACCOUNT_ID_DOES_NOT_EXIST));
            }
            Err(err) => return Err(AppError::internal(MSG_DATABASE_ERROR).caused_by(err)),
        }

        let registered = self
            .operations
            .exists(operation_type_id)
            .await
            .map_err(|err| AppError::internal(MSG_DATABASE_ERROR).caused_by(err))?;
        if !registered {
            return Err(AppError::validation(MSG_OPERATION_TYPE_INVALID)
                .caused_by(DomainError::InvalidOperation));
        }

        let new_transaction =
            NewTransaction::new(account_id, operation_type_id, amount).map_err(|err| match err {
                DomainError::InvalidAmount | DomainError::InvalidOperation => AppError::from(err),
                DomainError::InvalidDocument => {
                    AppError::internal(MSG_CREATE_TRANSACTION_FAILED).caused_by(err)
                }
            })?;

        // The account was checked above but nothing holds it in place until
        // the insert; a foreign key failure here reports the same way.
        let transaction = self
            .transactions
            .save(&new_transaction)
            .await
            .map_err(|err| match err {
                StoreError::ForeignKeyViolation(_) => {
                    AppError::validation(MSG_ACCOUNT_ID_DOES_NOT_EXIST).caused_by(err)
                }
                _ => AppError::internal(MSG_CREATE_TRANSACTION_FAILED).caused_by(err),
            })?;

        let operation = new_transaction.operation_type;
        tracing::info!(
            transaction_id = transaction.id,
            account_id,
            %operation,
            direction = if operation.is_credit() { "credit" } else { "debit" },
            amount = %transaction.amount,
            "transaction created"
        );
        Ok(transaction)
    }

    /// Fetch a transaction by id.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_transaction_id(&self, id: i64) -> Result<Transaction, AppError> {
        self.transactions
            .find_by_id(id)
            .await
            .map_err(|err| match err {
                StoreError::NotFound => AppError::not_found(MSG_TRANSACTION_NOT_FOUND),
                _ => AppError::internal(MSG_DATABASE_ERROR).caused_by(err),
            })
    }
}
