//! Services for the property API.

pub mod extraction_service;
pub mod property_service;
pub(crate) mod reconcile;

pub use extraction_service::ExtractionService;
pub use property_service::PropertyService;
