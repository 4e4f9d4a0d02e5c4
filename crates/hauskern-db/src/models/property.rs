//! Property model — the root of the three-level hierarchy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use utoipa::ToSchema;
use uuid::Uuid;

/// How a property is managed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "management_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ManagementType {
    /// Wohnungseigentümergemeinschaft (homeowners' association).
    #[default]
    Weg,
    /// Mietverwaltung (rental management).
    Mv,
}

/// A property row. Buildings are owned exclusively by their property and are
/// loaded separately.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Property {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Property display name.
    pub name: String,
    /// Management regime.
    pub management_type: ManagementType,
    /// Referenced manager contact, if any.
    pub manager_id: Option<Uuid>,
    /// Referenced accountant contact, if any.
    pub accountant_id: Option<Uuid>,
    /// Creation timestamp, set by the store.
    pub created_at: DateTime<Utc>,
}

/// Field set for inserting or updating a property row.
#[derive(Debug, Clone)]
pub struct NewProperty {
    /// Property display name.
    pub name: String,
    /// Management regime.
    pub management_type: ManagementType,
    /// Referenced manager contact, if any.
    pub manager_id: Option<Uuid>,
    /// Referenced accountant contact, if any.
    pub accountant_id: Option<Uuid>,
}

impl Property {
    /// Insert a new property. The id and creation timestamp are assigned by
    /// the store.
    pub async fn insert<'e, E>(executor: E, data: &NewProperty) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r"
            INSERT INTO properties (name, management_type, manager_id, accountant_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            ",
        )
        .bind(&data.name)
        .bind(data.management_type)
        .bind(data.manager_id)
        .bind(data.accountant_id)
        .fetch_one(executor)
        .await
    }

    /// Update a property's own fields by id.
    ///
    /// Returns `None` when no row matches.
    pub async fn update_by_id<'e, E>(
        executor: E,
        id: Uuid,
        data: &NewProperty,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r"
            UPDATE properties
            SET name = $2, management_type = $3, manager_id = $4, accountant_id = $5
            WHERE id = $1
            RETURNING *
            ",
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.management_type)
        .bind(data.manager_id)
        .bind(data.accountant_id)
        .fetch_optional(executor)
        .await
    }

    /// Find a property by id.
    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as("SELECT * FROM properties WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List all properties, oldest first.
    pub async fn find_all<'e, E>(executor: E) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as("SELECT * FROM properties ORDER BY created_at, id")
            .fetch_all(executor)
            .await
    }

    /// Delete a property by id. Owned buildings and units are removed by the
    /// store's cascade rules.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete_by_id<'e, E>(executor: E, id: Uuid) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
