//! Account data models and API request/response types.
//!
//! This module defines:
//! - `NewAccount`: A validated account that has not been stored yet
//! - `Account`: Database entity representing a stored account
//! - `CreateAccountRequest` / `AccountQuery`: Request inputs
//! - `AccountResponse`: Response body returned to clients

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::DomainError;

/// Accepted document lengths: 11 digits for a person, 14 for an entity.
const DOCUMENT_LENGTHS: [usize; 2] = [11, 14];

/// Returns true when `document` is exactly 11 or 14 ASCII digits.
pub fn is_valid_document(document: &str) -> bool {
    DOCUMENT_LENGTHS.contains(&document.len()) && document.bytes().all(|b| b.is_ascii_digit())
}

/// An account that passed validation but has no identity yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    document_number: String,
}

impl NewAccount {
    /// Validate a raw document number.
    ///
    /// Surrounding whitespace is trimmed; the trimmed value must be 11 or 14
    /// ASCII digits.
    ///
    /// # Errors
    ///
    /// - `InvalidDocument`: wrong length or a non-digit character
    pub fn new(raw_document: &str) -> Result<Self, DomainError> {
        let document = raw_document.trim();
        if !is_valid_document(document) {
            return Err(DomainError::InvalidDocument);
        }

        Ok(Self {
            document_number: document.to_string(),
        })
    }

    pub fn document_number(&self) -> &str {
        &self.document_number
    }
}

/// Represents an account record from the database.
///
/// # Database Table
///
/// Maps to the `accounts` table. Accounts are written once and never
/// updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Account {
    /// Identity assigned by the store
    #[sqlx(rename = "account_id")]
    pub id: i64,

    /// 11 or 14 digit document number, unique across accounts
    pub document_number: String,
}

/// Request body for creating a new account.
///
/// # JSON Example
///
/// ```json
/// {
///   "document_number": "12345678901"
/// }
/// ```
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    /// 11 or 14 digits; surrounding whitespace is ignored
    #[schema(example = "12345678901")]
    pub document_number: String,
}

/// Query string for looking an account up by document number.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AccountQuery {
    /// Document number to look up
    pub document_number: String,
}

/// Response body for account endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "account_id": 1,
///   "document_number": "12345678901"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    pub account_id: i64,
    pub document_number: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            account_id: account.id,
            document_number: account.document_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_eleven_and_fourteen_digits() {
        let person = NewAccount::new("12345678901").unwrap();
        assert_eq!(person.document_number(), "12345678901");

        let entity = NewAccount::new("12345678901234").unwrap();
        assert_eq!(entity.document_number(), "12345678901234");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let account = NewAccount::new(" \t12345678901\n ").unwrap();
        assert_eq!(account.document_number(), "12345678901");
    }

    #[test]
    fn rejects_bad_lengths() {
        for doc in ["", "123", "1234567890", "123456789012", "1234567890123", "123456789012345"] {
            assert_eq!(
                NewAccount::new(doc),
                Err(DomainError::InvalidDocument),
                "{doc:?}"
            );
        }
    }

    #[test]
    fn rejects_non_digits() {
        for doc in ["1234567890a", "123.456.789-01", "12345 678901", "١٢٣٤٥٦٧٨٩٠١", "+1234567890"] {
            assert_eq!(
                NewAccount::new(doc),
                Err(DomainError::InvalidDocument),
                "{doc:?}"
            );
        }
    }

    #[test]
    fn inner_whitespace_is_not_trimmed() {
        assert_eq!(
            NewAccount::new("12345 78901"),
            Err(DomainError::InvalidDocument)
        );
    }

    #[test]
    fn response_uses_account_id_key() {
        let response = AccountResponse::from(Account {
            id: 7,
            document_number: "12345678901".to_string(),
        });
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["account_id"], 7);
        assert_eq!(json["document_number"], "12345678901");
    }
}
