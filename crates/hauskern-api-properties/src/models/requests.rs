//! Incoming snapshot types for create and update.
//!
//! A snapshot always describes the full intended state of the levels it
//! carries: children present in the database but absent from the snapshot are
//! deleted during reconciliation. An id on a child only signals "this row
//! already exists" — ids are never client-assigned, and parent references are
//! always overwritten server-side.
//!
//! Wire naming follows the original portfolio API (camelCase).

use crate::error::ApiPropertiesError;
use crate::validation::{optional_decimal, optional_int, NumericInput};
use hauskern_core::{AccountantId, BuildingId, ManagerId, UnitId};
use hauskern_db::{ManagementType, NewBuilding, NewProperty, NewUnit, UnitType};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Full snapshot of a property tree, as sent by clients and by document
/// extraction.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInput {
    /// Property display name.
    pub name: String,
    /// Management regime. Defaults to WEG.
    #[serde(default)]
    pub management_type: ManagementType,
    /// Referenced manager contact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Uuid>)]
    pub manager_id: Option<ManagerId>,
    /// Referenced accountant contact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Uuid>)]
    pub accountant_id: Option<AccountantId>,
    /// Building snapshot. Absent means "leave the building level untouched";
    /// an empty list deletes every building.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buildings: Option<Vec<BuildingInput>>,
}

/// Snapshot of one building and, optionally, its units.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildingInput {
    /// Present when the building already exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Uuid>)]
    pub id: Option<BuildingId>,
    /// Optional building name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Street name.
    pub street: String,
    /// House number.
    pub house_number: String,
    /// Postcode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    /// Free-form additional address info.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
    /// Unit snapshot. Absent means "leave the unit level untouched"; an
    /// empty list deletes every unit of this building.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<Vec<UnitInput>>,
}

/// Snapshot of one unit. Numeric attributes stay raw here and are normalized
/// just before persistence.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitInput {
    /// Present when the unit already exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Uuid>)]
    pub id: Option<UnitId>,
    /// Unit label, e.g. "A-101".
    pub unit_number: String,
    /// Kind of unit. Defaults to Apartment.
    #[serde(default, rename = "type")]
    pub unit_type: UnitType,
    /// Floor description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    /// Entrance identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrance: Option<String>,
    /// Area in square meters; number, numeric string, empty string or null.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_sq_m: Option<NumericInput>,
    /// Co-ownership share.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co_ownership_share: Option<NumericInput>,
    /// Room count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms: Option<NumericInput>,
    /// Year of construction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction_year: Option<NumericInput>,
}

impl From<&PropertyInput> for NewProperty {
    fn from(input: &PropertyInput) -> Self {
        NewProperty {
            name: input.name.clone(),
            management_type: input.management_type,
            manager_id: input.manager_id.map(Into::into),
            accountant_id: input.accountant_id.map(Into::into),
        }
    }
}

impl From<&BuildingInput> for NewBuilding {
    fn from(input: &BuildingInput) -> Self {
        NewBuilding {
            name: input.name.clone(),
            street: input.street.clone(),
            house_number: input.house_number.clone(),
            postcode: input.postcode.clone(),
            additional_info: input.additional_info.clone(),
        }
    }
}

impl UnitInput {
    /// Normalize the raw numeric attributes into a persistable field set.
    ///
    /// # Errors
    ///
    /// Returns [`ApiPropertiesError::Validation`] naming the first field that
    /// failed to parse.
    pub fn normalized(&self) -> Result<NewUnit, ApiPropertiesError> {
        Ok(NewUnit {
            unit_number: self.unit_number.clone(),
            unit_type: self.unit_type,
            floor: self.floor.clone(),
            entrance: self.entrance.clone(),
            size_sq_m: optional_decimal("sizeSqM", self.size_sq_m.as_ref())?,
            co_ownership_share: optional_decimal(
                "coOwnershipShare",
                self.co_ownership_share.as_ref(),
            )?,
            rooms: optional_decimal("rooms", self.rooms.as_ref())?,
            construction_year: optional_int("constructionYear", self.construction_year.as_ref())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn deserializes_full_snapshot_with_wire_names() {
        let input: PropertyInput = serde_json::from_str(
            r#"{
                "name": "Plaza",
                "managementType": "MV",
                "buildings": [{
                    "street": "Main",
                    "houseNumber": "1",
                    "units": [{
                        "unitNumber": "A1",
                        "type": "Office",
                        "sizeSqM": "75.5",
                        "constructionYear": 1995
                    }]
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(input.name, "Plaza");
        assert_eq!(input.management_type, ManagementType::Mv);
        let buildings = input.buildings.unwrap();
        assert_eq!(buildings[0].house_number, "1");
        let units = buildings[0].units.as_ref().unwrap();
        assert_eq!(units[0].unit_type, UnitType::Office);
        assert!(units[0].id.is_none());
    }

    #[test]
    fn absent_buildings_is_distinct_from_empty() {
        let without: PropertyInput = serde_json::from_str(r#"{"name": "A"}"#).unwrap();
        assert!(without.buildings.is_none());

        let empty: PropertyInput =
            serde_json::from_str(r#"{"name": "A", "buildings": []}"#).unwrap();
        assert_eq!(empty.buildings.unwrap().len(), 0);
    }

    #[test]
    fn contact_references_deserialize_as_typed_ids() {
        let input: PropertyInput = serde_json::from_str(
            r#"{
                "name": "A",
                "managerId": "550e8400-e29b-41d4-a716-446655440001",
                "accountantId": "550e8400-e29b-41d4-a716-446655440002"
            }"#,
        )
        .unwrap();

        let manager_id = input.manager_id.unwrap();
        assert_eq!(manager_id.to_string(), "550e8400-e29b-41d4-a716-446655440001");

        let row = NewProperty::from(&input);
        assert_eq!(row.manager_id, Some(manager_id.into_uuid()));
        assert_eq!(
            row.accountant_id.map(|id| id.to_string()).as_deref(),
            Some("550e8400-e29b-41d4-a716-446655440002")
        );
    }

    #[test]
    fn management_type_defaults_to_weg() {
        let input: PropertyInput = serde_json::from_str(r#"{"name": "A"}"#).unwrap();
        assert_eq!(input.management_type, ManagementType::Weg);
    }

    #[test]
    fn unit_normalization_maps_empty_to_null_and_parses_values() {
        let unit: UnitInput = serde_json::from_str(
            r#"{
                "unitNumber": "A1",
                "sizeSqM": "75.5",
                "coOwnershipShare": "",
                "rooms": 3.5,
                "constructionYear": "1995"
            }"#,
        )
        .unwrap();

        let normalized = unit.normalized().unwrap();
        assert_eq!(normalized.size_sq_m, Some(Decimal::from_str("75.5").unwrap()));
        assert_eq!(normalized.co_ownership_share, None);
        assert_eq!(normalized.rooms, Some(Decimal::from_str("3.5").unwrap()));
        assert_eq!(normalized.construction_year, Some(1995));
    }

    #[test]
    fn unit_normalization_fails_closed_on_garbage() {
        let unit: UnitInput =
            serde_json::from_str(r#"{"unitNumber": "A1", "sizeSqM": "abc"}"#).unwrap();
        let err = unit.normalized().unwrap_err();
        assert!(matches!(
            err,
            ApiPropertiesError::Validation { field: "sizeSqM", .. }
        ));
    }
}
