//! Transaction HTTP handlers.
//!
//! This module implements transaction-related API endpoints:
//! - POST /v1/transactions - Post a debit or credit against an account
//! - GET /v1/transactions/{transaction_id} - Get transaction details

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::{
    error::{AppError, ErrorResponse, MSG_INVALID_BODY, MSG_TRANSACTION_ID_INVALID},
    handlers::AppState,
    models::transaction::{CreateTransactionRequest, TransactionResponse},
};

/// Post a transaction.
///
/// # Request Body
///
/// ```json
/// {
///   "account_id": 1,
///   "operation_type_id": 4,
///   "amount": 123.45
/// }
/// ```
///
/// # Response (201)
///
/// ```json
/// {
///   "transaction_id": 1,
///   "account_id": 1,
///   "operation_type_id": 4,
///   "amount": 123.45,
///   "event_date": "2025-12-21T16:00:00Z"
/// }
/// ```
///
/// Purchases, installment purchases and withdrawals come back negative;
/// payments come back positive.
#[utoipa::path(
    post,
    path = "/v1/transactions",
    tag = "transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction posted", body = TransactionResponse),
        (status = 400, description = "Unknown account, invalid operation type, non-positive amount or malformed body", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionResponse>), AppError> {
    let Json(request) = payload
        .map_err(|rejection| AppError::invalid_body(MSG_INVALID_BODY).caused_by(rejection.body_text()))?;

    let transaction = state
        .transactions
        .create_transaction(request.account_id, request.operation_type_id, request.amount)
        .await?;

    Ok((StatusCode::CREATED, Json(transaction.into())))
}

/// Get transaction by ID.
#[utoipa::path(
    get,
    path = "/v1/transactions/{transaction_id}",
    tag = "transactions",
    params(("transaction_id" = i64, Path, description = "Transaction identifier")),
    responses(
        (status = 200, description = "Transaction found", body = TransactionResponse),
        (status = 400, description = "Transaction id is not an integer", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    )
)]
pub async fn get_transaction(
    State(state): State<AppState>,
    transaction_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<TransactionResponse>, AppError> {
    let Path(transaction_id) = transaction_id.map_err(|rejection| {
        AppError::invalid_id(MSG_TRANSACTION_ID_INVALID).caused_by(rejection.body_text())
    })?;

    let transaction = state
        .transactions
        .get_by_transaction_id(transaction_id)
        .await?;

    Ok(Json(transaction.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{Router, http::StatusCode};
    use tower::ServiceExt;

    use crate::{
        error::{
            MSG_ACCOUNT_ID_DOES_NOT_EXIST, MSG_AMOUNT_INVALID, MSG_INVALID_BODY,
            MSG_OPERATION_TYPE_INVALID, MSG_TRANSACTION_ID_INVALID, MSG_TRANSACTION_NOT_FOUND,
        },
        handlers::test_support::{app, get, json_body, post_json},
        repositories::memory::InMemoryStore,
    };

    async fn app_with_account() -> Router {
        let app = app(Arc::new(InMemoryStore::new()));
        let response = app
            .clone()
            .oneshot(post_json("/v1/accounts", r#"{"document_number":"12345678901"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        app
    }

    async fn post_transaction(app: &Router, body: &str) -> axum::http::Response<axum::body::Body> {
        app.clone()
            .oneshot(post_json("/v1/transactions", body))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn payment_is_positive() {
        let app = app_with_account().await;

        let response = post_transaction(
            &app,
            r#"{"account_id":1,"operation_type_id":4,"amount":50.0}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["account_id"], 1);
        assert_eq!(body["operation_type_id"], 4);
        assert_eq!(body["amount"], serde_json::json!(50.0));
        assert!(body["event_date"].is_string());
    }

    #[tokio::test]
    async fn purchase_is_negative_and_fetchable() {
        let app = app_with_account().await;

        let response = post_transaction(
            &app,
            r#"{"account_id":1,"operation_type_id":1,"amount":100.50}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        assert_eq!(created["amount"], serde_json::json!(-100.5));

        let uri = format!("/v1/transactions/{}", created["transaction_id"]);
        let fetched = app.oneshot(get(&uri)).await.unwrap();

        assert_eq!(fetched.status(), StatusCode::OK);
        assert_eq!(json_body(fetched).await, created);
    }

    #[tokio::test]
    async fn unknown_account_is_bad_request() {
        let app = app_with_account().await;

        let response = post_transaction(
            &app,
            r#"{"account_id":999,"operation_type_id":4,"amount":50.0}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["message"], MSG_ACCOUNT_ID_DOES_NOT_EXIST);
    }

    #[tokio::test]
    async fn zero_amount_is_bad_request() {
        let app = app_with_account().await;

        let response = post_transaction(
            &app,
            r#"{"account_id":1,"operation_type_id":4,"amount":0}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["message"], MSG_AMOUNT_INVALID);
    }

    #[tokio::test]
    async fn unknown_operation_is_bad_request() {
        let app = app_with_account().await;

        let response = post_transaction(
            &app,
            r#"{"account_id":1,"operation_type_id":99,"amount":10}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"]["message"],
            MSG_OPERATION_TYPE_INVALID
        );
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let app = app_with_account().await;

        let response = post_transaction(&app, r#"{"account_id":"one"}"#).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "invalid_body");
        assert_eq!(body["error"]["message"], MSG_INVALID_BODY);
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let app = app_with_account().await;

        let response = app.oneshot(get("/v1/transactions/77")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response).await["error"]["message"],
            MSG_TRANSACTION_NOT_FOUND
        );
    }

    #[tokio::test]
    async fn non_numeric_transaction_id_is_bad_request() {
        let app = app_with_account().await;

        let response = app.oneshot(get("/v1/transactions/x1")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "invalid_id");
        assert_eq!(body["error"]["message"], MSG_TRANSACTION_ID_INVALID);
    }
}
