//! Database entity models for hauskern-db.
//!
//! These models represent the database tables and provide
//! type-safe interactions with PostgreSQL. Query methods are generic over
//! [`sqlx::PgExecutor`] so the same code runs against a pool or inside an
//! open transaction.

pub mod accountant;
pub mod building;
pub mod manager;
pub mod property;
pub mod unit;

pub use accountant::Accountant;
pub use building::{Building, NewBuilding};
pub use manager::Manager;
pub use property::{ManagementType, NewProperty, Property};
pub use unit::{NewUnit, Unit, UnitType};
