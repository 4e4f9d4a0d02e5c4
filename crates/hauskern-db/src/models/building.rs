//! Building model — the mid level of the hierarchy, owned by a property.

use serde::Serialize;
use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

/// A building row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Building {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Owning property. Always overwritten from the reconciliation parent,
    /// never taken from client input.
    pub property_id: Uuid,
    /// Optional building name.
    pub name: Option<String>,
    /// Street name.
    pub street: String,
    /// House number (free-form, may carry suffixes like "12a").
    pub house_number: String,
    /// Postcode, if known.
    pub postcode: Option<String>,
    /// Free-form additional address info.
    pub additional_info: Option<String>,
}

/// Field set for inserting or updating a building row. The owning property id
/// is passed separately by the reconciliation engine.
#[derive(Debug, Clone)]
pub struct NewBuilding {
    /// Optional building name.
    pub name: Option<String>,
    /// Street name.
    pub street: String,
    /// House number.
    pub house_number: String,
    /// Postcode, if known.
    pub postcode: Option<String>,
    /// Free-form additional address info.
    pub additional_info: Option<String>,
}

impl Building {
    /// Insert a new building under the given property.
    pub async fn insert<'e, E>(
        executor: E,
        property_id: Uuid,
        data: &NewBuilding,
    ) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r"
            INSERT INTO buildings (property_id, name, street, house_number, postcode, additional_info)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            ",
        )
        .bind(property_id)
        .bind(&data.name)
        .bind(&data.street)
        .bind(&data.house_number)
        .bind(&data.postcode)
        .bind(&data.additional_info)
        .fetch_one(executor)
        .await
    }

    /// Update a building by id, overwriting its owning property id.
    ///
    /// Returns `None` when no row matches.
    pub async fn update_by_id<'e, E>(
        executor: E,
        id: Uuid,
        property_id: Uuid,
        data: &NewBuilding,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r"
            UPDATE buildings
            SET property_id = $2, name = $3, street = $4, house_number = $5,
                postcode = $6, additional_info = $7
            WHERE id = $1
            RETURNING *
            ",
        )
        .bind(id)
        .bind(property_id)
        .bind(&data.name)
        .bind(&data.street)
        .bind(&data.house_number)
        .bind(&data.postcode)
        .bind(&data.additional_info)
        .fetch_optional(executor)
        .await
    }

    /// List the buildings owned by one property.
    pub async fn find_by_property<'e, E>(
        executor: E,
        property_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as("SELECT * FROM buildings WHERE property_id = $1 ORDER BY id")
            .bind(property_id)
            .fetch_all(executor)
            .await
    }

    /// List the buildings owned by any of the given properties.
    pub async fn find_by_properties<'e, E>(
        executor: E,
        property_ids: &[Uuid],
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as("SELECT * FROM buildings WHERE property_id = ANY($1) ORDER BY id")
            .bind(property_ids)
            .fetch_all(executor)
            .await
    }

    /// Delete buildings by id in one bulk statement. Owned units are removed
    /// by the store's cascade rules.
    pub async fn delete_by_ids<'e, E>(executor: E, ids: &[Uuid]) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM buildings WHERE id = ANY($1)")
            .bind(ids)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
