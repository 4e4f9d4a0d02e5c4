//! Property Portfolio API.
//!
//! This crate provides the transactional tree-reconciliation core of
//! hauskern plus its REST endpoints:
//! - create/read/update/delete of property trees (property → buildings →
//!   units), where updates synchronize persisted children against a full
//!   client snapshot inside one transaction
//! - numeric input normalization with fail-closed validation
//! - PDF document extraction through an OpenAI-compatible collaborator
//!
//! # Example
//!
//! ```rust,ignore
//! use hauskern_api_properties::{properties_router, ExtractionService, PropertiesState};
//! use axum::Router;
//!
//! let state = PropertiesState::new(pool, ExtractionService::new(api_key, None));
//! let app = Router::new().nest("/properties", properties_router(state));
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod validation;

// Re-export public API
pub use error::ApiPropertiesError;
pub use router::{properties_router, PropertiesState};
pub use services::{ExtractionService, PropertyService};
