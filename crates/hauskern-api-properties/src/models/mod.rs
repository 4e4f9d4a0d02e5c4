//! Wire models for the property API.

pub mod requests;
pub mod responses;

pub use requests::{BuildingInput, PropertyInput, UnitInput};
pub use responses::{BuildingTreeResponse, ContactResponse, PropertyTreeResponse, UnitResponse};
