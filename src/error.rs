//! Error types and HTTP error response handling.
//!
//! Three layers of errors flow through the service:
//!
//! - [`DomainError`]: a value failed a domain rule while being constructed
//! - [`crate::repositories::StoreError`]: a persistence collaborator failed or found nothing
//! - [`AppError`]: the taxonomy services return and handlers render
//!
//! Services translate the first two into the last; only [`AppError`] ever
//! reaches the HTTP boundary.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

/// Boxed cause kept on an [`AppError`] for diagnostics.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub const MSG_DOCUMENT_INVALID: &str = "document must have exactly 11 or 14 digits";
pub const MSG_ACCOUNT_EXISTS: &str = "account with this document already exists";
pub const MSG_ACCOUNT_NOT_FOUND: &str = "account not found";
pub const MSG_ACCOUNT_ID_INVALID: &str = "the account ID must be a valid integer";
pub const MSG_ACCOUNT_ID_DOES_NOT_EXIST: &str = "account id does not exist";
pub const MSG_TRANSACTION_NOT_FOUND: &str = "transaction not found";
pub const MSG_TRANSACTION_ID_INVALID: &str = "the transaction ID must be a valid integer";
pub const MSG_OPERATION_TYPE_INVALID: &str = "invalid operation type";
pub const MSG_AMOUNT_INVALID: &str = "amount must be greater than zero";
pub const MSG_DATABASE_ERROR: &str = "database error";
pub const MSG_SAVE_ACCOUNT_FAILED: &str = "failed to save account";
pub const MSG_CREATE_TRANSACTION_FAILED: &str = "failed to create transaction";
pub const MSG_INVALID_BODY: &str = "invalid request body or missing required fields";
pub const MSG_REQUEST_TIMED_OUT: &str = "request timed out";

pub const CODE_VALIDATION: &str = "validation_error";
/// The request body could not be parsed or lacks required fields.
pub const CODE_INVALID_BODY: &str = "invalid_body";
/// A path identifier is not an integer.
pub const CODE_INVALID_ID: &str = "invalid_id";

/// Generic text returned to clients for every internal failure.
const MSG_INTERNAL_PUBLIC: &str = "An internal error occurred";

/// A value rejected by one of the model constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Document number is not 11 or 14 ASCII digits after trimming.
    #[error("invalid document format")]
    InvalidDocument,

    /// Transaction amount is zero or negative.
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// Operation type code is not one of the known operation types.
    #[error("invalid operation type for transaction")]
    InvalidOperation,
}

/// Category of an [`AppError`], independent of transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Internal,
}

/// Application-wide error type.
///
/// Every variant carries a message that is safe to show a caller and an
/// optional cause kept only for logging.
///
/// # Error Categories
///
/// - **Validation**: caller input broke a domain rule or could not be parsed
/// - **Conflict**: a uniqueness constraint would be violated
/// - **NotFound**: a lookup by identifier found nothing
/// - **Internal**: the store or catalog failed for reasons unrelated to input
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Returns HTTP 400 Bad Request.
    ///
    /// `code` tells rule violations apart from unparseable input.
    #[error("{message}")]
    Validation {
        code: &'static str,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Returns HTTP 409 Conflict.
    #[error("{message}")]
    Conflict {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Returns HTTP 404 Not Found.
    #[error("{message}")]
    NotFound {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Returns HTTP 500 Internal Server Error (hides details from client).
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            code: CODE_VALIDATION,
            message: message.into(),
            source: None,
        }
    }

    /// Unparseable or incomplete request body.
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::Validation {
            code: CODE_INVALID_BODY,
            message: message.into(),
            source: None,
        }
    }

    /// Path identifier that is not an integer.
    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::Validation {
            code: CODE_INVALID_ID,
            message: message.into(),
            source: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            source: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            source: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying cause.
    pub fn caused_by(mut self, cause: impl Into<BoxError>) -> Self {
        match &mut self {
            Self::Validation { source, .. }
            | Self::Conflict { source, .. }
            | Self::NotFound { source, .. }
            | Self::Internal { source, .. } => *source = Some(cause.into()),
        }
        self
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. }
            | Self::Conflict { message, .. }
            | Self::NotFound { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }

    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { code, .. } => *code,
            Self::Conflict { .. } => "conflict",
            Self::NotFound { .. } => "not_found",
            Self::Internal { .. } => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The domain rule behind this error, if one caused it.
    #[cfg(test)]
    pub fn domain_cause(&self) -> Option<DomainError> {
        std::error::Error::source(self)?
            .downcast_ref::<DomainError>()
            .copied()
    }

    /// Full cause chain rendered for logs.
    fn cause_chain(&self) -> String {
        let mut chain = Vec::new();
        let mut current = std::error::Error::source(self);
        while let Some(err) = current {
            chain.push(err.to_string());
            current = err.source();
        }
        chain.join(": ")
    }
}

/// Domain rule violations surface as validation errors with a rule-specific message.
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let message = match err {
            DomainError::InvalidDocument => MSG_DOCUMENT_INVALID,
            DomainError::InvalidAmount => MSG_AMOUNT_INVALID,
            DomainError::InvalidOperation => MSG_OPERATION_TYPE_INVALID,
        };
        AppError::validation(message).caused_by(err)
    }
}

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Stable machine-readable code, e.g. `validation_error` or `invalid_id`
    pub code: String,
    pub message: String,
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "validation_error",
///     "message": "amount must be greater than zero"
///   }
/// }
/// ```
///
/// Internal errors are logged with their cause chain and rendered with a
/// generic message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        let message = match self.kind() {
            ErrorKind::Internal => {
                tracing::error!(error = %self, cause = %self.cause_chain(), "request failed");
                MSG_INTERNAL_PUBLIC.to_string()
            }
            _ => {
                tracing::debug!(code, error = %self, "request rejected");
                self.message().to_string()
            }
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}
