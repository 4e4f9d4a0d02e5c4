//! Health check endpoints.
//!
//! - `GET /health` / `GET /healthz` - process liveness, no dependencies
//! - `GET /readyz` - readiness, verifies database connectivity

use axum::{http::StatusCode, Extension, Json};
use sqlx::PgPool;

/// Liveness probe. Answers as long as the process is serving requests.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Readiness probe. Fails while the database is unreachable.
pub async fn readyz_handler(
    Extension(pool): Extension<PgPool>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        })?;

    Ok(Json(serde_json::json!({ "status": "ready" })))
}
