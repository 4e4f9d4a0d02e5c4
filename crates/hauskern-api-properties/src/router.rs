//! Property API router configuration.
//!
//! Configures routes for property management endpoints:
//! - GET /properties - List property trees
//! - POST /properties - Create a property from a snapshot
//! - GET /properties/:id - Get one property tree
//! - PATCH /properties/:id - Reconcile a property against a snapshot
//! - DELETE /properties/:id - Delete a property (cascades)
//! - GET /properties/contacts/managers - List manager contacts
//! - GET /properties/contacts/accountants - List accountant contacts
//! - POST /properties/extract - Extract a snapshot from a PDF document

use crate::handlers::{
    create_property_handler, delete_property_handler, extract_property_handler,
    get_property_handler, list_accountants_handler, list_managers_handler,
    list_properties_handler, update_property_handler,
};
use crate::services::{ExtractionService, PropertyService};
use axum::{
    routing::{get, post},
    Extension, Router,
};
use sqlx::PgPool;
use std::sync::Arc;

/// Application state for property routes.
#[derive(Clone)]
pub struct PropertiesState {
    /// Database connection pool.
    pub pool: PgPool,
    /// Property service for CRUD and reconciliation.
    pub property_service: Arc<PropertyService>,
    /// Extraction collaborator for PDF snapshots.
    pub extraction_service: Arc<ExtractionService>,
}

impl PropertiesState {
    /// Create a new properties state.
    #[must_use]
    pub fn new(pool: PgPool, extraction_service: ExtractionService) -> Self {
        let property_service = Arc::new(PropertyService::new(pool.clone()));
        Self {
            pool,
            property_service,
            extraction_service: Arc::new(extraction_service),
        }
    }
}

/// Create the property router with all endpoints, mounted under `/properties`.
pub fn properties_router(state: PropertiesState) -> Router {
    Router::new()
        .route(
            "/",
            get(list_properties_handler).post(create_property_handler),
        )
        .route("/contacts/managers", get(list_managers_handler))
        .route("/contacts/accountants", get(list_accountants_handler))
        .route("/extract", post(extract_property_handler))
        .route(
            "/:id",
            get(get_property_handler)
                .patch(update_property_handler)
                .delete(delete_property_handler),
        )
        .layer(Extension(state.property_service.clone()))
        .layer(Extension(state.extraction_service.clone()))
}
