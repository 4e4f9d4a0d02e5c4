//! Unit model — the leaf level of the hierarchy, owned by a building.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use utoipa::ToSchema;
use uuid::Uuid;

/// Kind of unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "unit_type")]
pub enum UnitType {
    /// Residential apartment.
    #[default]
    Apartment,
    /// Commercial office space.
    Office,
    /// Garden plot.
    Garden,
    /// Parking space.
    Parking,
}

/// A unit row.
///
/// The four numeric attributes are nullable; they are normalized from raw
/// client input before they reach this layer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Unit {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Owning building. Always overwritten from the reconciliation parent.
    pub building_id: Uuid,
    /// Unit label, e.g. "A-101".
    pub unit_number: String,
    /// Kind of unit.
    pub unit_type: UnitType,
    /// Floor description, e.g. "1. OG".
    pub floor: Option<String>,
    /// Entrance identifier.
    pub entrance: Option<String>,
    /// Area in square meters.
    pub size_sq_m: Option<Decimal>,
    /// Co-ownership share (Miteigentumsanteil).
    pub co_ownership_share: Option<Decimal>,
    /// Room count, halves allowed (e.g. 3.5).
    pub rooms: Option<Decimal>,
    /// Year of construction.
    pub construction_year: Option<i32>,
}

/// Field set for inserting or updating a unit row, with numerics already
/// normalized. The owning building id is passed separately by the
/// reconciliation engine.
#[derive(Debug, Clone)]
pub struct NewUnit {
    /// Unit label.
    pub unit_number: String,
    /// Kind of unit.
    pub unit_type: UnitType,
    /// Floor description.
    pub floor: Option<String>,
    /// Entrance identifier.
    pub entrance: Option<String>,
    /// Area in square meters.
    pub size_sq_m: Option<Decimal>,
    /// Co-ownership share.
    pub co_ownership_share: Option<Decimal>,
    /// Room count.
    pub rooms: Option<Decimal>,
    /// Year of construction.
    pub construction_year: Option<i32>,
}

impl Unit {
    /// Insert a new unit under the given building.
    pub async fn insert<'e, E>(
        executor: E,
        building_id: Uuid,
        data: &NewUnit,
    ) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r"
            INSERT INTO units (
                building_id, unit_number, unit_type, floor, entrance,
                size_sq_m, co_ownership_share, rooms, construction_year
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            ",
        )
        .bind(building_id)
        .bind(&data.unit_number)
        .bind(data.unit_type)
        .bind(&data.floor)
        .bind(&data.entrance)
        .bind(data.size_sq_m)
        .bind(data.co_ownership_share)
        .bind(data.rooms)
        .bind(data.construction_year)
        .fetch_one(executor)
        .await
    }

    /// Update a unit by id, overwriting its owning building id.
    ///
    /// Returns `None` when no row matches.
    pub async fn update_by_id<'e, E>(
        executor: E,
        id: Uuid,
        building_id: Uuid,
        data: &NewUnit,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r"
            UPDATE units
            SET building_id = $2, unit_number = $3, unit_type = $4, floor = $5,
                entrance = $6, size_sq_m = $7, co_ownership_share = $8,
                rooms = $9, construction_year = $10
            WHERE id = $1
            RETURNING *
            ",
        )
        .bind(id)
        .bind(building_id)
        .bind(&data.unit_number)
        .bind(data.unit_type)
        .bind(&data.floor)
        .bind(&data.entrance)
        .bind(data.size_sq_m)
        .bind(data.co_ownership_share)
        .bind(data.rooms)
        .bind(data.construction_year)
        .fetch_optional(executor)
        .await
    }

    /// List the units owned by one building.
    pub async fn find_by_building<'e, E>(
        executor: E,
        building_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as("SELECT * FROM units WHERE building_id = $1 ORDER BY id")
            .bind(building_id)
            .fetch_all(executor)
            .await
    }

    /// List the units owned by any of the given buildings.
    pub async fn find_by_buildings<'e, E>(
        executor: E,
        building_ids: &[Uuid],
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as("SELECT * FROM units WHERE building_id = ANY($1) ORDER BY id")
            .bind(building_ids)
            .fetch_all(executor)
            .await
    }

    /// Delete units by id in one bulk statement.
    pub async fn delete_by_ids<'e, E>(executor: E, ids: &[Uuid]) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM units WHERE id = ANY($1)")
            .bind(ids)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_type_serializes_as_wire_values() {
        assert_eq!(serde_json::to_string(&UnitType::Apartment).unwrap(), "\"Apartment\"");
        assert_eq!(serde_json::to_string(&UnitType::Parking).unwrap(), "\"Parking\"");
    }

    #[test]
    fn unit_type_defaults_to_apartment() {
        assert_eq!(UnitType::default(), UnitType::Apartment);
    }
}
