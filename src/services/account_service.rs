//! Account service - creation and lookup of accounts.

use std::sync::Arc;

use crate::{
    error::{
        AppError, MSG_ACCOUNT_EXISTS, MSG_ACCOUNT_NOT_FOUND, MSG_DATABASE_ERROR,
        MSG_SAVE_ACCOUNT_FAILED,
    },
    models::account::{Account, NewAccount},
    repositories::{AccountStore, StoreError},
};

/// Orchestrates account creation and lookup over an [`AccountStore`].
#[derive(Clone)]
pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
}

impl AccountService {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    /// Create an account for a document number.
    ///
    /// # Process
    ///
    /// 1. Validate and trim the document number
    /// 2. Reject the request if an account already uses the document
    /// 3. Persist the account
    ///
    /// # Errors
    ///
    /// - `Validation`: document is not 11 or 14 digits
    /// - `Conflict`: document already registered (by the pre-check or by a
    ///   concurrent insert caught by the unique constraint)
    /// - `Internal`: the store failed
    #[tracing::instrument(skip_all)]
    pub async fn create_account(&self, document_number: &str) -> Result<Account, AppError> {
        let new_account = NewAccount::new(document_number)?;

        match self
            .accounts
            .find_by_document(new_account.document_number())
            .await
        {
            Ok(existing) => {
                tracing::debug!(account_id = existing.id, "document already registered");
                return Err(AppError::conflict(MSG_ACCOUNT_EXISTS));
            }
            Err(StoreError::NotFound) => {}
            Err(err) => return Err(AppError::internal(MSG_DATABASE_ERROR).caused_by(err)),
        }

        let account = self
            .accounts
            .save(&new_account)
            .await
            .map_err(|err| match err {
                StoreError::UniqueViolation(_) => AppError::conflict(MSG_ACCOUNT_EXISTS).caused_by(err),
                _ => AppError::internal(MSG_SAVE_ACCOUNT_FAILED).caused_by(err),
            })?;

        tracing::info!(account_id = account.id, "account created");
        Ok(account)
    }

    /// Look an account up by its document number.
    #[tracing::instrument(skip_all)]
    pub async fn get_account(&self, document_number: &str) -> Result<Account, AppError> {
        self.accounts
            .find_by_document(document_number)
            .await
            .map_err(lookup_error)
    }

    /// Look an account up by id.
    #[tracing::instrument(skip(self))]
    pub async fn get_account_by_id(&self, id: i64) -> Result<Account, AppError> {
        self.accounts.find_by_id(id).await.map_err(lookup_error)
    }
}

fn lookup_error(err: StoreError) -> AppError {
    match err {
        StoreError::NotFound => AppError::not_found(MSG_ACCOUNT_NOT_FOUND),
        err => AppError::internal(MSG_DATABASE_ERROR).caused_by(err),
    }
}
