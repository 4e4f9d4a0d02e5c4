//! Property service: transactional writes over the three-level hierarchy.
//!
//! Every write runs inside one transaction: property fields first, then
//! building reconciliation, then unit reconciliation per building — units
//! need the canonical building ids produced immediately before them. A
//! failure at any depth rolls back the whole call; the caller observes either
//! the full new tree or the untouched previous state.
//!
//! Concurrent updates to the same property are not guarded beyond the
//! database's native isolation level; the last committed transaction wins.

use crate::error::ApiPropertiesError;
use crate::models::requests::PropertyInput;
use crate::models::responses::{BuildingTreeResponse, ContactResponse, PropertyTreeResponse};
use crate::services::reconcile::reconcile_children;
use hauskern_core::PropertyId;
use hauskern_db::{Accountant, Building, Manager, NewProperty, Property, Unit};
use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

/// Service for property CRUD and snapshot reconciliation.
pub struct PropertyService {
    pool: PgPool,
}

impl PropertyService {
    /// Create a new property service.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a property from a full snapshot.
    ///
    /// Inserts the property, then every building and unit of the snapshot,
    /// in one transaction. Returns the persisted tree read back by id.
    pub async fn create(
        &self,
        input: &PropertyInput,
    ) -> Result<PropertyTreeResponse, ApiPropertiesError> {
        let mut tx = self.pool.begin().await?;
        let property_id = match Self::create_tree(&mut tx, input).await {
            Ok(id) => {
                tx.commit().await?;
                id
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "Rollback failed after create error");
                }
                return Err(err);
            }
        };

        tracing::info!(property_id = %property_id, "Created property");
        self.find_one(PropertyId::from_uuid(property_id))
            .await?
            .ok_or(ApiPropertiesError::NotFound)
    }

    /// Update a property from a full snapshot, reconciling both child levels.
    ///
    /// Buildings persisted under the property but absent from the snapshot
    /// are deleted (their units cascade), and likewise for units under each
    /// building. Returns the persisted tree read back by id.
    pub async fn update(
        &self,
        id: PropertyId,
        input: &PropertyInput,
    ) -> Result<PropertyTreeResponse, ApiPropertiesError> {
        let mut tx = self.pool.begin().await?;
        match Self::update_tree(&mut tx, id.into_uuid(), input).await {
            Ok(()) => tx.commit().await?,
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "Rollback failed after update error");
                }
                return Err(err);
            }
        }

        tracing::info!(property_id = %id, "Updated property");
        self.find_one(id).await?.ok_or(ApiPropertiesError::NotFound)
    }

    /// Read one property tree with resolved contacts.
    pub async fn find_one(
        &self,
        id: PropertyId,
    ) -> Result<Option<PropertyTreeResponse>, ApiPropertiesError> {
        let Some(property) = Property::find_by_id(&self.pool, id.into_uuid()).await? else {
            return Ok(None);
        };
        let mut trees = self.assemble_trees(vec![property]).await?;
        Ok(trees.pop())
    }

    /// Read all property trees with resolved contacts.
    pub async fn find_all(&self) -> Result<Vec<PropertyTreeResponse>, ApiPropertiesError> {
        let properties = Property::find_all(&self.pool).await?;
        self.assemble_trees(properties).await
    }

    /// Delete a property by id. Buildings and units are removed by the
    /// store's cascade rules.
    pub async fn delete(&self, id: PropertyId) -> Result<(), ApiPropertiesError> {
        let deleted = Property::delete_by_id(&self.pool, id.into_uuid()).await?;
        if !deleted {
            return Err(ApiPropertiesError::NotFound);
        }
        tracing::info!(property_id = %id, "Deleted property");
        Ok(())
    }

    /// List all manager contacts.
    pub async fn find_all_managers(&self) -> Result<Vec<Manager>, ApiPropertiesError> {
        Ok(Manager::list_all(&self.pool).await?)
    }

    /// List all accountant contacts.
    pub async fn find_all_accountants(&self) -> Result<Vec<Accountant>, ApiPropertiesError> {
        Ok(Accountant::list_all(&self.pool).await?)
    }

    /// Insert the whole snapshot under a fresh property id. Runs inside the
    /// caller's transaction.
    async fn create_tree(
        conn: &mut PgConnection,
        input: &PropertyInput,
    ) -> Result<Uuid, ApiPropertiesError> {
        let property = Property::insert(&mut *conn, &NewProperty::from(input)).await?;

        if let Some(buildings) = &input.buildings {
            let building_rows =
                reconcile_children::<Building>(&mut *conn, property.id, &[], buildings).await?;
            for (row, building_input) in building_rows.iter().zip(buildings) {
                if let Some(units) = &building_input.units {
                    reconcile_children::<Unit>(&mut *conn, row.id, &[], units).await?;
                }
            }
        }

        Ok(property.id)
    }

    /// Apply an update snapshot: property fields, then reconciliation of both
    /// child levels. Runs inside the caller's transaction.
    async fn update_tree(
        conn: &mut PgConnection,
        id: Uuid,
        input: &PropertyInput,
    ) -> Result<(), ApiPropertiesError> {
        let updated = Property::update_by_id(&mut *conn, id, &NewProperty::from(input)).await?;
        if updated.is_none() {
            return Err(ApiPropertiesError::NotFound);
        }

        if let Some(buildings) = &input.buildings {
            let persisted = Building::find_by_property(&mut *conn, id).await?;
            let building_rows =
                reconcile_children::<Building>(&mut *conn, id, &persisted, buildings).await?;

            for (row, building_input) in building_rows.iter().zip(buildings) {
                if let Some(units) = &building_input.units {
                    let persisted_units = Unit::find_by_building(&mut *conn, row.id).await?;
                    reconcile_children::<Unit>(&mut *conn, row.id, &persisted_units, units).await?;
                }
            }
        }

        Ok(())
    }

    /// Assemble nested trees for a set of property rows with three bulk reads
    /// (buildings, units, contacts) instead of per-row queries.
    async fn assemble_trees(
        &self,
        properties: Vec<Property>,
    ) -> Result<Vec<PropertyTreeResponse>, ApiPropertiesError> {
        if properties.is_empty() {
            return Ok(Vec::new());
        }

        let property_ids: Vec<Uuid> = properties.iter().map(|p| p.id).collect();
        let buildings = Building::find_by_properties(&self.pool, &property_ids).await?;

        let building_ids: Vec<Uuid> = buildings.iter().map(|b| b.id).collect();
        let units = if building_ids.is_empty() {
            Vec::new()
        } else {
            Unit::find_by_buildings(&self.pool, &building_ids).await?
        };

        let manager_ids: Vec<Uuid> = properties.iter().filter_map(|p| p.manager_id).collect();
        let managers: HashMap<Uuid, Manager> = if manager_ids.is_empty() {
            HashMap::new()
        } else {
            Manager::find_by_ids(&self.pool, &manager_ids)
                .await?
                .into_iter()
                .map(|m| (m.id, m))
                .collect()
        };

        let accountant_ids: Vec<Uuid> = properties.iter().filter_map(|p| p.accountant_id).collect();
        let accountants: HashMap<Uuid, Accountant> = if accountant_ids.is_empty() {
            HashMap::new()
        } else {
            Accountant::find_by_ids(&self.pool, &accountant_ids)
                .await?
                .into_iter()
                .map(|a| (a.id, a))
                .collect()
        };

        let mut units_by_building: HashMap<Uuid, Vec<_>> = HashMap::new();
        for unit in units {
            units_by_building
                .entry(unit.building_id)
                .or_default()
                .push(unit.into());
        }

        let mut buildings_by_property: HashMap<Uuid, Vec<BuildingTreeResponse>> = HashMap::new();
        for building in buildings {
            let building_units = units_by_building.remove(&building.id).unwrap_or_default();
            buildings_by_property
                .entry(building.property_id)
                .or_default()
                .push(BuildingTreeResponse::new(building, building_units));
        }

        let mut trees = Vec::with_capacity(properties.len());
        for property in properties {
            let manager: Option<ContactResponse> = property
                .manager_id
                .and_then(|id| managers.get(&id).cloned())
                .map(Into::into);
            let accountant: Option<ContactResponse> = property
                .accountant_id
                .and_then(|id| accountants.get(&id).cloned())
                .map(Into::into);
            let property_buildings = buildings_by_property
                .remove(&property.id)
                .unwrap_or_default();
            trees.push(PropertyTreeResponse::new(
                property,
                property_buildings,
                manager,
                accountant,
            ));
        }
        Ok(trees)
    }
}
