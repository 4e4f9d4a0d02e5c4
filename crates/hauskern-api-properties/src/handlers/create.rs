//! Create property endpoint handler.
//!
//! POST /properties - Create a property from a full snapshot.

use crate::error::ApiPropertiesError;
use crate::models::{PropertyInput, PropertyTreeResponse};
use crate::services::PropertyService;
use axum::{http::StatusCode, Extension, Json};
use std::sync::Arc;

/// Creates a property together with the buildings and units of the snapshot,
/// atomically.
#[utoipa::path(
    post,
    path = "/properties",
    request_body = PropertyInput,
    responses(
        (status = 201, description = "Property created", body = PropertyTreeResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Constraint violation"),
    ),
    tag = "Properties"
)]
pub async fn create_property_handler(
    Extension(property_service): Extension<Arc<PropertyService>>,
    Json(input): Json<PropertyInput>,
) -> Result<(StatusCode, Json<PropertyTreeResponse>), ApiPropertiesError> {
    tracing::info!(
        name = %input.name,
        buildings = input.buildings.as_ref().map_or(0, Vec::len),
        "Creating property"
    );

    let tree = property_service.create(&input).await?;
    Ok((StatusCode::CREATED, Json(tree)))
}
