//! Hauskern Core Library
//!
//! Shared types for the hauskern property portfolio service.
//!
//! # Modules
//!
//! - [`ids`] - Strongly typed identifiers (`PropertyId`, `BuildingId`, `UnitId`,
//!   `ManagerId`, `AccountantId`)
//!
//! # Example
//!
//! ```
//! use hauskern_core::{BuildingId, PropertyId, UnitId};
//!
//! let property_id = PropertyId::new();
//! let building_id = BuildingId::new();
//! let unit_id = UnitId::new();
//! ```

pub mod ids;

// Re-export main types for convenient access
pub use ids::{AccountantId, BuildingId, ManagerId, ParseIdError, PropertyId, UnitId};
