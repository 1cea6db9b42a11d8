//! OpenAPI document for the HTTP surface and a Swagger UI page that renders it.

use axum::{Json, response::Html};
use utoipa::OpenApi;

use crate::{
    error::{ErrorDetail, ErrorResponse},
    handlers::{accounts, health, health::HealthResponse, transactions},
    models::{
        account::{AccountResponse, CreateAccountRequest},
        transaction::{CreateTransactionRequest, TransactionResponse},
    },
};

/// Where the JSON document is served.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Account Ledger API",
        description = "Register accounts by document number and post signed transactions against them."
    ),
    paths(
        health::health_check,
        accounts::create_account,
        accounts::find_account,
        accounts::get_account,
        transactions::create_transaction,
        transactions::get_transaction,
    ),
    components(schemas(
        CreateAccountRequest,
        AccountResponse,
        CreateTransactionRequest,
        TransactionResponse,
        HealthResponse,
        ErrorResponse,
        ErrorDetail,
    )),
    tags(
        (name = "accounts", description = "Account registration and lookup"),
        (name = "transactions", description = "Posting and reading transactions"),
        (name = "health", description = "Liveness and database connectivity"),
    )
)]
pub struct ApiDoc;

/// `GET /api-docs/openapi.json`
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// `GET /swagger-ui`
pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI)
}

const SWAGGER_UI: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Account Ledger API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/api-docs/openapi.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;
