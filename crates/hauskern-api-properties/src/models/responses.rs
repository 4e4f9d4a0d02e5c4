//! Response types: the fully nested property tree and contact lists.

use chrono::{DateTime, Utc};
use hauskern_core::{AccountantId, ManagerId};
use hauskern_db::{Accountant, Building, ManagementType, Manager, Property, Unit, UnitType};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A contact reference resolved on read.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    /// Contact id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact email, if known.
    pub email: Option<String>,
}

impl From<Manager> for ContactResponse {
    fn from(row: Manager) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

impl From<Accountant> for ContactResponse {
    fn from(row: Accountant) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

/// A unit as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitResponse {
    /// Canonical (store-assigned) id.
    pub id: Uuid,
    /// Owning building id.
    pub building_id: Uuid,
    /// Unit label.
    pub unit_number: String,
    /// Kind of unit.
    #[serde(rename = "type")]
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

impl From<Unit> for UnitResponse {
    fn from(row: Unit) -> Self {
        Self {
            id: row.id,
            building_id: row.building_id,
            unit_number: row.unit_number,
            unit_type: row.unit_type,
            floor: row.floor,
            entrance: row.entrance,
            size_sq_m: row.size_sq_m,
            co_ownership_share: row.co_ownership_share,
            rooms: row.rooms,
            construction_year: row.construction_year,
        }
    }
}

/// A building with its nested units.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildingTreeResponse {
    /// Canonical (store-assigned) id.
    pub id: Uuid,
    /// Owning property id.
    pub property_id: Uuid,
    /// Optional building name.
    pub name: Option<String>,
    /// Street name.
    pub street: String,
    /// House number.
    pub house_number: String,
    /// Postcode.
    pub postcode: Option<String>,
    /// Free-form additional address info.
    pub additional_info: Option<String>,
    /// Units owned by this building.
    pub units: Vec<UnitResponse>,
}

impl BuildingTreeResponse {
    /// Attach units to a building row.
    #[must_use]
    pub fn new(row: Building, units: Vec<UnitResponse>) -> Self {
        Self {
            id: row.id,
            property_id: row.property_id,
            name: row.name,
            street: row.street,
            house_number: row.house_number,
            postcode: row.postcode,
            additional_info: row.additional_info,
            units,
        }
    }
}

/// A property with its nested buildings, units and resolved contacts.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyTreeResponse {
    /// Canonical (store-assigned) id.
    pub id: Uuid,
    /// Property display name.
    pub name: String,
    /// Management regime.
    pub management_type: ManagementType,
    /// Referenced manager id.
    #[schema(value_type = Option<Uuid>)]
    pub manager_id: Option<ManagerId>,
    /// Referenced accountant id.
    #[schema(value_type = Option<Uuid>)]
    pub accountant_id: Option<AccountantId>,
    /// Resolved manager contact.
    pub manager: Option<ContactResponse>,
    /// Resolved accountant contact.
    pub accountant: Option<ContactResponse>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Buildings owned by this property.
    pub buildings: Vec<BuildingTreeResponse>,
}

impl PropertyTreeResponse {
    /// Assemble a tree from its parts.
    #[must_use]
    pub fn new(
        row: Property,
        buildings: Vec<BuildingTreeResponse>,
        manager: Option<ContactResponse>,
        accountant: Option<ContactResponse>,
    ) -> Self {
        Self {
            id: row.id,
            name: row.name,
            management_type: row.management_type,
            manager_id: row.manager_id.map(ManagerId::from_uuid),
            accountant_id: row.accountant_id.map(AccountantId::from_uuid),
            manager,
            accountant,
            created_at: row.created_at,
            buildings,
        }
    }
}
