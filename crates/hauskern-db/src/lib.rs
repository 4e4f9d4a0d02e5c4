//! Database layer for the hauskern property portfolio service.
//!
//! Provides:
//! - [`DbPool`] - PostgreSQL connection pool with sensible defaults
//! - [`run_migrations`] - embedded, versioned schema migrations
//! - [`models`] - one module per table with `PgExecutor`-generic queries
//!
//! # Example
//!
//! ```rust,ignore
//! use hauskern_db::{run_migrations, DbPool};
//!
//! let pool = DbPool::connect("postgres://localhost/hauskern").await?;
//! run_migrations(&pool).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod models;
pub mod pool;

pub use error::DbError;
pub use migrations::run_migrations;
pub use models::{
    Accountant, Building, ManagementType, Manager, NewBuilding, NewProperty, NewUnit, Property,
    Unit, UnitType,
};
pub use pool::DbPool;
