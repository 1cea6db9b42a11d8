//! Transaction data models and API request/response types.
//!
//! This module defines:
//! - `NewTransaction`: A validated, sign-normalized transaction not yet stored
//! - `Transaction`: Database entity representing a stored transaction
//! - `CreateTransactionRequest`: Request body for posting a transaction
//! - `TransactionResponse`: Response body returned to clients

use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::DomainError, models::operation_type::OperationType};

/// A transaction that passed validation and carries its signed amount.
///
/// Callers supply a positive magnitude; the sign comes from the operation
/// type (negative for debits, positive for credits).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub account_id: i64,
    pub operation_type: OperationType,
    pub amount: Decimal,
    pub event_date: DateTime<Utc>,
}

impl NewTransaction {
    /// Validate and normalize a transaction, stamping it with the current time.
    ///
    /// The timestamp is truncated to microseconds, the precision PostgreSQL keeps.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount`: `amount` is zero or negative
    /// - `InvalidOperation`: `operation_type_id` is not a known operation type
    pub fn new(account_id: i64, operation_type_id: i16, amount: Decimal) -> Result<Self, DomainError> {
        Self::new_at(account_id, operation_type_id, amount, Utc::now().trunc_subsecs(6))
    }

    /// Same as [`NewTransaction::new`] with an explicit event date.
    pub fn new_at(
        account_id: i64,
        operation_type_id: i16,
        amount: Decimal,
        event_date: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::InvalidAmount);
        }
        let operation_type = OperationType::try_from(operation_type_id)?;

        Ok(Self {
            account_id,
            operation_type,
            amount: operation_type.signed(amount),
            event_date,
        })
    }
}

/// Represents a transaction record from the database.
///
/// # Database Table
///
/// Maps to the `transactions` table. Rows are immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Transaction {
    #[sqlx(rename = "transaction_id")]
    pub id: i64,

    /// Account the transaction was posted against
    pub account_id: i64,

    /// Code from `operations_types`
    pub operation_type_id: i16,

    /// Signed amount: negative for debits, positive for credits, never zero
    pub amount: Decimal,

    /// When the transaction was constructed
    pub event_date: DateTime<Utc>,
}

impl Transaction {
    /// Combine a normalized transaction with the identity the store assigned.
    pub fn from_new(id: i64, new: &NewTransaction) -> Self {
        Self {
            id,
            account_id: new.account_id,
            operation_type_id: new.operation_type.code(),
            amount: new.amount,
            event_date: new.event_date,
        }
    }
}

/// Request to post a transaction.
///
/// # JSON Example
///
/// ```json
/// {
///   "account_id": 1,
///   "operation_type_id": 4,
///   "amount": 123.45
/// }
/// ```
///
/// `amount` is the positive magnitude; both JSON numbers and strings are accepted.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    pub account_id: i64,
    /// 1 purchase, 2 installment purchase, 3 withdrawal, 4 payment
    pub operation_type_id: i16,
    #[schema(value_type = f64, example = 123.45)]
    pub amount: Decimal,
}

/// Response returned for transaction operations.
///
/// # JSON Example
///
/// ```json
/// {
///   "transaction_id": 10,
///   "account_id": 1,
///   "operation_type_id": 1,
///   "amount": -50.0,
///   "event_date": "2025-12-21T16:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionResponse {
    pub transaction_id: i64,
    pub account_id: i64,
    pub operation_type_id: i16,
    /// Negative for debits, positive for credits
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub event_date: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            transaction_id: transaction.id,
            account_id: transaction.account_id,
            operation_type_id: transaction.operation_type_id,
            amount: transaction.amount,
            event_date: transaction.event_date,
        }
    }
}
