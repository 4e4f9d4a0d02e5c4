//! List properties endpoint handler.
//!
//! GET /properties - Retrieve all property trees.

use crate::error::ApiPropertiesError;
use crate::models::PropertyTreeResponse;
use crate::services::PropertyService;
use axum::{Extension, Json};
use std::sync::Arc;

/// Returns every property with nested buildings, units and resolved contacts.
#[utoipa::path(
    get,
    path = "/properties",
    responses(
        (status = 200, description = "All properties", body = Vec<PropertyTreeResponse>),
    ),
    tag = "Properties"
)]
pub async fn list_properties_handler(
    Extension(property_service): Extension<Arc<PropertyService>>,
) -> Result<Json<Vec<PropertyTreeResponse>>, ApiPropertiesError> {
    let trees = property_service.find_all().await?;
    Ok(Json(trees))
}
