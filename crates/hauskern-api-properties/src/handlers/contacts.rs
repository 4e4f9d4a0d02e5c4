//! Contact list endpoint handlers.
//!
//! GET /properties/contacts/managers
//! GET /properties/contacts/accountants
//!
//! Flat lists used by client forms to pick contact references.

use crate::error::ApiPropertiesError;
use crate::services::PropertyService;
use axum::{Extension, Json};
use hauskern_db::{Accountant, Manager};
use std::sync::Arc;

/// Returns all manager contacts.
#[utoipa::path(
    get,
    path = "/properties/contacts/managers",
    responses(
        (status = 200, description = "All managers", body = Vec<Manager>),
    ),
    tag = "Contacts"
)]
pub async fn list_managers_handler(
    Extension(property_service): Extension<Arc<PropertyService>>,
) -> Result<Json<Vec<Manager>>, ApiPropertiesError> {
    Ok(Json(property_service.find_all_managers().await?))
}

/// Returns all accountant contacts.
#[utoipa::path(
    get,
    path = "/properties/contacts/accountants",
    responses(
        (status = 200, description = "All accountants", body = Vec<Accountant>),
    ),
    tag = "Contacts"
)]
pub async fn list_accountants_handler(
    Extension(property_service): Extension<Arc<PropertyService>>,
) -> Result<Json<Vec<Accountant>>, ApiPropertiesError> {
    Ok(Json(property_service.find_all_accountants().await?))
}
