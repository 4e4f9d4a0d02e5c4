//! Document extraction endpoint handler.
//!
//! POST /properties/extract - Extract a property snapshot from an uploaded
//! PDF. The result is returned to the client for review and goes through the
//! ordinary create/update endpoints; extraction has no privileged write path.

use crate::error::ApiPropertiesError;
use crate::models::PropertyInput;
use crate::services::ExtractionService;
use axum::{Extension, Json};
use std::sync::Arc;

/// Extracts a property snapshot from a PDF document.
#[utoipa::path(
    post,
    path = "/properties/extract",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Extracted snapshot", body = PropertyInput),
        (status = 400, description = "No file uploaded"),
        (status = 502, description = "Extraction collaborator failed"),
        (status = 503, description = "Extraction not configured"),
    ),
    tag = "Properties"
)]
pub async fn extract_property_handler(
    Extension(extraction_service): Extension<Arc<ExtractionService>>,
    mut multipart: axum_extra::extract::Multipart,
) -> Result<Json<PropertyInput>, ApiPropertiesError> {
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiPropertiesError::Extraction(format!("Multipart read error: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiPropertiesError::Extraction(format!("Failed to read file: {e}")))?;
            file_data = Some(bytes.to_vec());
        }
        // Ignore unknown fields
    }

    let data = file_data.ok_or(ApiPropertiesError::Validation {
        field: "file",
        value: String::new(),
    })?;

    let snapshot = extraction_service.extract_property(&data).await?;
    Ok(Json(snapshot))
}
