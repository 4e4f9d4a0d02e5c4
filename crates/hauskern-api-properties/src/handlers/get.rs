//! Get property endpoint handler.
//!
//! GET /properties/:id - Retrieve one property tree.

use crate::error::ApiPropertiesError;
use crate::models::PropertyTreeResponse;
use crate::services::PropertyService;
use axum::{extract::Path, Extension, Json};
use hauskern_core::PropertyId;
use std::sync::Arc;

/// Returns one property with nested buildings, units and resolved contacts.
#[utoipa::path(
    get,
    path = "/properties/{id}",
    params(
        ("id" = String, Path, description = "Property ID"),
    ),
    responses(
        (status = 200, description = "The property", body = PropertyTreeResponse),
        (status = 404, description = "Property not found"),
    ),
    tag = "Properties"
)]
pub async fn get_property_handler(
    Extension(property_service): Extension<Arc<PropertyService>>,
    Path(id): Path<String>,
) -> Result<Json<PropertyTreeResponse>, ApiPropertiesError> {
    let property_id = id
        .parse::<PropertyId>()
        .map_err(|_| ApiPropertiesError::Validation { field: "id", value: id })?;

    let tree = property_service
        .find_one(property_id)
        .await?
        .ok_or(ApiPropertiesError::NotFound)?;
    Ok(Json(tree))
}
