//! Manager contact model.
//!
//! Managers are referenced by properties, never owned: many properties may
//! point at the same manager.

use serde::Serialize;
use sqlx::{FromRow, PgExecutor};
use utoipa::ToSchema;
use uuid::Uuid;

/// A property manager contact.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Manager {
    /// Unique identifier for the manager.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact email, if known.
    pub email: Option<String>,
}

impl Manager {
    /// Insert a new manager contact.
    pub async fn insert<'e, E>(
        executor: E,
        name: &str,
        email: Option<&str>,
    ) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as("INSERT INTO managers (name, email) VALUES ($1, $2) RETURNING *")
            .bind(name)
            .bind(email)
            .fetch_one(executor)
            .await
    }

    /// List all managers, ordered by name.
    pub async fn list_all<'e, E>(executor: E) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as("SELECT * FROM managers ORDER BY name")
            .fetch_all(executor)
            .await
    }

    /// Find managers by a set of ids.
    pub async fn find_by_ids<'e, E>(executor: E, ids: &[Uuid]) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as("SELECT * FROM managers WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(executor)
            .await
    }
}
