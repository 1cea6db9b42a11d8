//! Account management HTTP handlers.
//!
//! This module implements the account-related API endpoints:
//! - POST /v1/accounts - Create new account
//! - GET /v1/accounts/{account_id} - Get account by ID
//! - GET /v1/accounts?document_number=... - Get account by document number

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};

use crate::{
    error::{AppError, ErrorResponse, MSG_ACCOUNT_ID_INVALID, MSG_INVALID_BODY},
    handlers::AppState,
    models::account::{AccountQuery, AccountResponse, CreateAccountRequest, NewAccount},
};

/// Create a new account.
///
/// # Endpoint
///
/// `POST /v1/accounts`
///
/// # Request Body
///
/// ```json
/// {
///   "document_number": "12345678901"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: Returns the created account
/// - **Error (400)**: Malformed body or invalid document number
/// - **Error (409)**: Document number already registered
/// - **Error (500)**: Database error
#[utoipa::path(
    post,
    path = "/v1/accounts",
    tag = "accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Malformed body or invalid document number", body = ErrorResponse),
        (status = 409, description = "Document number already registered", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
pub async fn create_account(
    State(state): State<AppState>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountResponse>), AppError> {
    let Json(request) = payload
        .map_err(|rejection| AppError::invalid_body(MSG_INVALID_BODY).caused_by(rejection.body_text()))?;

    let account = state.accounts.create_account(&request.document_number).await?;

    Ok((StatusCode::CREATED, Json(account.into())))
}

/// Get a specific account by ID.
///
/// # Response
///
/// - **Success (200 OK)**: Returns account details
/// - **Error (400)**: Path segment is not an integer
/// - **Error (404)**: Account not found
#[utoipa::path(
    get,
    path = "/v1/accounts/{account_id}",
    tag = "accounts",
    params(("account_id" = i64, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Account found", body = AccountResponse),
        (status = 400, description = "Account id is not an integer", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse)
    )
)]
pub async fn get_account(
    State(state): State<AppState>,
    account_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<AccountResponse>, AppError> {
    let Path(account_id) = account_id
        .map_err(|rejection| AppError::invalid_id(MSG_ACCOUNT_ID_INVALID).caused_by(rejection.body_text()))?;

    let account = state.accounts.get_account_by_id(account_id).await?;

    Ok(Json(account.into()))
}

/// Find an account by document number.
///
/// The document is validated the same way as on creation, so malformed
/// numbers are rejected with 400 before any lookup happens.
#[utoipa::path(
    get,
    path = "/v1/accounts",
    tag = "accounts",
    params(AccountQuery),
    responses(
        (status = 200, description = "Account found", body = AccountResponse),
        (status = 400, description = "Missing or invalid document number", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse)
    )
)]
pub async fn find_account(
    State(state): State<AppState>,
    query: Result<Query<AccountQuery>, QueryRejection>,
) -> Result<Json<AccountResponse>, AppError> {
    let Query(query) = query
        .map_err(|rejection| AppError::validation(MSG_INVALID_BODY).caused_by(rejection.body_text()))?;
    let document = NewAccount::new(&query.document_number)?;

    let account = state.accounts.get_account(document.document_number()).await?;

    Ok(Json(account.into()))
}
