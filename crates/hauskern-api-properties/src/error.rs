//! Error types for the Property Portfolio API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Postgres error code for foreign key violations.
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";
/// Postgres error code for unique constraint violations.
const PG_UNIQUE_VIOLATION: &str = "23505";

/// Error type for the Property Portfolio API.
///
/// Every error raised inside a reconciliation transaction aborts the
/// transaction; nothing is recovered locally, so a failed create or update
/// never leaves partial writes behind.
#[derive(Debug, thiserror::Error)]
pub enum ApiPropertiesError {
    /// Property not found, or an incoming snapshot referenced a child id that
    /// does not belong to its parent.
    #[error("Property not found")]
    NotFound,

    /// A numeric field failed normalization.
    #[error("Invalid value for field '{field}': '{value}'")]
    Validation {
        /// The offending field, in wire naming.
        field: &'static str,
        /// The raw value as received.
        value: String,
    },

    /// Database error. Constraint violations are mapped to 409 in the
    /// response; everything else is a 500.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Document extraction is not configured on this deployment.
    #[error("Document extraction is not configured")]
    ExtractionUnavailable,

    /// The extraction collaborator failed or returned an unusable payload.
    #[error("Document extraction failed: {0}")]
    Extraction(String),
}

/// RFC 7807 style problem response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemDetails {
    /// Problem type URI.
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short human-readable title.
    pub title: String,
    /// HTTP status code.
    pub status: u16,
    /// Detailed description of this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiPropertiesError {
    /// HTTP status this error maps to.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiPropertiesError::NotFound => StatusCode::NOT_FOUND,
            ApiPropertiesError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiPropertiesError::Database(err) if is_constraint_violation(err) => {
                StatusCode::CONFLICT
            }
            ApiPropertiesError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiPropertiesError::ExtractionUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiPropertiesError::Extraction(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Check whether a sqlx error is a foreign key or uniqueness violation
/// surfaced by Postgres.
fn is_constraint_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == PG_FOREIGN_KEY_VIOLATION || code == PG_UNIQUE_VIOLATION)
}

impl IntoResponse for ApiPropertiesError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (title, detail) = match &self {
            ApiPropertiesError::NotFound => ("Not Found".to_string(), self.to_string()),
            ApiPropertiesError::Validation { .. } => {
                ("Validation Error".to_string(), self.to_string())
            }
            ApiPropertiesError::Database(err) if is_constraint_violation(err) => {
                ("Conflict".to_string(), "Constraint violation".to_string())
            }
            ApiPropertiesError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    "Internal Server Error".to_string(),
                    "An unexpected database error occurred".to_string(),
                )
            }
            ApiPropertiesError::ExtractionUnavailable => {
                ("Service Unavailable".to_string(), self.to_string())
            }
            ApiPropertiesError::Extraction(msg) => {
                tracing::error!(error = %msg, "Extraction error");
                ("Bad Gateway".to_string(), self.to_string())
            }
        };

        let problem = ProblemDetails {
            problem_type: format!(
                "https://hauskern.dev/problems/{}",
                title.to_lowercase().replace(' ', "-")
            ),
            title,
            status: status.as_u16(),
            detail: Some(detail),
        };

        (status, Json(problem)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(
            ApiPropertiesError::NotFound.status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn validation_maps_to_400_and_names_the_field() {
        let err = ApiPropertiesError::Validation {
            field: "sizeSqM",
            value: "abc".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let msg = err.to_string();
        assert!(msg.contains("sizeSqM"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn plain_database_error_maps_to_500() {
        let err = ApiPropertiesError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn extraction_errors_map_to_gateway_statuses() {
        assert_eq!(
            ApiPropertiesError::ExtractionUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiPropertiesError::Extraction("boom".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }
}
