//! Accountant contact model.
//!
//! Accountants are referenced by properties, never owned.

use serde::Serialize;
use sqlx::{FromRow, PgExecutor};
use utoipa::ToSchema;
use uuid::Uuid;

/// A property accountant contact.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Accountant {
    /// Unique identifier for the accountant.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact email, if known.
    pub email: Option<String>,
}

impl Accountant {
    /// Insert a new accountant contact.
    pub async fn insert<'e, E>(
        executor: E,
        name: &str,
        email: Option<&str>,
    ) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as("INSERT INTO accountants (name, email) VALUES ($1, $2) RETURNING *")
            .bind(name)
            .bind(email)
            .fetch_one(executor)
            .await
    }

    /// List all accountants, ordered by name.
    pub async fn list_all<'e, E>(executor: E) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as("SELECT * FROM accountants ORDER BY name")
            .fetch_all(executor)
            .await
    }

    /// Find accountants by a set of ids.
    pub async fn find_by_ids<'e, E>(executor: E, ids: &[Uuid]) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as("SELECT * FROM accountants WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(executor)
            .await
    }
}
