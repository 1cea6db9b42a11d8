//! Health check endpoint for service monitoring.

use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{db, handlers::AppState};

/// How long the database ping may take before the service reports unavailable.
const PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Health check response.
///
/// Returns service status and database connectivity.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall service status
    #[schema(value_type = String, example = "healthy")]
    pub status: &'static str,

    /// Database connection status
    #[schema(value_type = String, example = "connected")]
    pub database: &'static str,

    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
}

/// Health check handler.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "healthy",
///   "database": "connected",
///   "timestamp": "2025-12-21T19:00:00Z"
/// }
/// ```
///
/// # Response (503 Service Unavailable)
///
/// Same shape with `"status": "unavailable"` and `"database": "disconnected"`
/// when the ping fails or takes longer than two seconds.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service and database are up", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let reachable = match tokio::time::timeout(PING_TIMEOUT, db::ping(&state.pool)).await {
        Ok(Ok(())) => true,
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "database ping failed");
            false
        }
        Err(_) => {
            tracing::warn!("database ping timed out");
            false
        }
    };

    let (status, body) = if reachable {
        (StatusCode::OK, ("healthy", "connected"))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, ("unavailable", "disconnected"))
    };

    (
        status,
        Json(HealthResponse {
            status: body.0,
            database: body.1,
            timestamp: Utc::now(),
        }),
    )
}
