//! Delete property endpoint handler.
//!
//! DELETE /properties/:id - Remove a property and, via cascade, its tree.

use crate::error::ApiPropertiesError;
use crate::services::PropertyService;
use axum::{extract::Path, http::StatusCode, Extension};
use hauskern_core::PropertyId;
use std::sync::Arc;

/// Deletes a property; owned buildings and units are removed by the store's
/// cascade rules.
#[utoipa::path(
    delete,
    path = "/properties/{id}",
    params(
        ("id" = String, Path, description = "Property ID"),
    ),
    responses(
        (status = 204, description = "Property deleted"),
        (status = 404, description = "Property not found"),
    ),
    tag = "Properties"
)]
pub async fn delete_property_handler(
    Extension(property_service): Extension<Arc<PropertyService>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiPropertiesError> {
    let property_id = id
        .parse::<PropertyId>()
        .map_err(|_| ApiPropertiesError::Validation { field: "id", value: id })?;

    property_service.delete(property_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
