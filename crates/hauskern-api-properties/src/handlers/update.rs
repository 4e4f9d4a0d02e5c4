//! Update property endpoint handler.
//!
//! PATCH /properties/:id - Reconcile a property against a full snapshot.

use crate::error::ApiPropertiesError;
use crate::models::{PropertyInput, PropertyTreeResponse};
use crate::services::PropertyService;
use axum::{extract::Path, Extension, Json};
use hauskern_core::PropertyId;
use std::sync::Arc;

/// Updates property fields and synchronizes both child levels against the
/// snapshot: buildings and units absent from it are deleted, elements with an
/// id are updated, elements without one are inserted. All or nothing.
#[utoipa::path(
    patch,
    path = "/properties/{id}",
    params(
        ("id" = String, Path, description = "Property ID"),
    ),
    request_body = PropertyInput,
    responses(
        (status = 200, description = "Property updated", body = PropertyTreeResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Property or referenced child not found"),
        (status = 409, description = "Constraint violation"),
    ),
    tag = "Properties"
)]
pub async fn update_property_handler(
    Extension(property_service): Extension<Arc<PropertyService>>,
    Path(id): Path<String>,
    Json(input): Json<PropertyInput>,
) -> Result<Json<PropertyTreeResponse>, ApiPropertiesError> {
    let property_id = id
        .parse::<PropertyId>()
        .map_err(|_| ApiPropertiesError::Validation { field: "id", value: id })?;

    tracing::info!(
        property_id = %property_id,
        buildings = input.buildings.as_ref().map_or(0, Vec::len),
        "Updating property"
    );

    let tree = property_service.update(property_id, &input).await?;
    Ok(Json(tree))
}
