//! Integration tests for hauskern-api-properties.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test -p hauskern-api-properties --features integration`
//!
//! Set `DATABASE_URL` to point at a disposable test database.

#![cfg(feature = "integration")]

mod common;

use common::{
    building_input, property_input, snapshot_from_tree, unique_name, unit_input,
    PropertyTestContext,
};
use hauskern_api_properties::validation::NumericInput;
use hauskern_api_properties::{ApiPropertiesError, PropertyService};
use hauskern_core::{BuildingId, PropertyId};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

// ===========================================================================
// Round-trip
// ===========================================================================

#[tokio::test]
async fn create_then_read_returns_the_submitted_tree() {
    let ctx = PropertyTestContext::new().await;
    let service = PropertyService::new(ctx.pool.inner().clone());

    let name = unique_name("Plaza");
    let input = property_input(
        &name,
        vec![building_input(
            "Main",
            "1",
            vec![unit_input("A1", Some("75.5"))],
        )],
    );

    let created = service.create(&input).await.expect("create failed");
    assert_eq!(created.name, name);
    assert_eq!(created.buildings.len(), 1);

    // Parent foreign keys carry the store-assigned ids of the level above.
    let building = &created.buildings[0];
    assert_eq!(building.property_id, created.id);
    assert_eq!(building.units.len(), 1);
    assert_eq!(building.units[0].building_id, building.id);
    assert_eq!(
        building.units[0].size_sq_m,
        Some(Decimal::from_str("75.5").unwrap())
    );

    let read = service
        .find_one(PropertyId::from_uuid(created.id))
        .await
        .expect("read failed")
        .expect("property missing after create");
    assert_eq!(read.id, created.id);
    assert_eq!(read.buildings.len(), 1);
    assert_eq!(read.buildings[0].units[0].unit_number, "A1");

    service.delete(PropertyId::from_uuid(created.id)).await.unwrap();
}

#[tokio::test]
async fn contact_references_are_resolved_on_read() {
    let ctx = PropertyTestContext::new().await;
    let service = PropertyService::new(ctx.pool.inner().clone());

    let manager_id = ctx.create_manager("Erika Musterfrau").await;
    let mut input = property_input(&unique_name("Hof"), vec![]);
    input.manager_id = Some(manager_id);

    let created = service.create(&input).await.expect("create failed");
    assert_eq!(created.manager_id, Some(manager_id));
    let manager = created.manager.expect("manager not resolved");
    assert_eq!(manager.name, "Erika Musterfrau");
    assert!(created.accountant.is_none());

    service.delete(PropertyId::from_uuid(created.id)).await.unwrap();
}

#[tokio::test]
async fn inserted_contacts_appear_in_contact_lists() {
    let ctx = PropertyTestContext::new().await;
    let service = PropertyService::new(ctx.pool.inner().clone());

    let manager_name = unique_name("Manager");
    let accountant_name = unique_name("Accountant");
    let manager_id = ctx.create_manager(&manager_name).await;
    let accountant_id = ctx.create_accountant(&accountant_name).await;

    let managers = service.find_all_managers().await.expect("list failed");
    let manager = managers
        .iter()
        .find(|m| m.id == manager_id.into_uuid())
        .expect("inserted manager missing from list");
    assert_eq!(manager.name, manager_name);
    assert!(manager.email.as_deref().is_some_and(|e| e.contains('@')));

    let accountants = service.find_all_accountants().await.expect("list failed");
    assert!(accountants
        .iter()
        .any(|a| a.id == accountant_id.into_uuid() && a.name == accountant_name));
}

// ===========================================================================
// Deletion by absence
// ===========================================================================

#[tokio::test]
async fn buildings_absent_from_snapshot_are_deleted_with_their_units() {
    let ctx = PropertyTestContext::new().await;
    let service = PropertyService::new(ctx.pool.inner().clone());

    let input = property_input(
        &unique_name("Doppel"),
        vec![
            building_input("Erste", "1", vec![unit_input("1A", None)]),
            building_input("Zweite", "2", vec![unit_input("2A", None), unit_input("2B", None)]),
        ],
    );
    let created = service.create(&input).await.expect("create failed");
    assert_eq!(created.buildings.len(), 2);

    let removed = created
        .buildings
        .iter()
        .find(|b| b.street == "Zweite")
        .unwrap();
    let removed_id = removed.id;
    assert_eq!(ctx.count_units(removed_id).await, 2);

    // Snapshot keeps only the first building.
    let mut snapshot = snapshot_from_tree(&created);
    snapshot
        .buildings
        .as_mut()
        .unwrap()
        .retain(|b| b.id != Some(BuildingId::from_uuid(removed_id)));

    let updated = service
        .update(PropertyId::from_uuid(created.id), &snapshot)
        .await
        .expect("update failed");
    assert_eq!(updated.buildings.len(), 1);
    assert_eq!(updated.buildings[0].street, "Erste");

    // The building row is gone and its units cascaded away.
    assert_eq!(ctx.count_buildings(created.id).await, 1);
    assert_eq!(ctx.count_units(removed_id).await, 0);

    service.delete(PropertyId::from_uuid(created.id)).await.unwrap();
}

#[tokio::test]
async fn empty_child_list_deletes_every_child() {
    let ctx = PropertyTestContext::new().await;
    let service = PropertyService::new(ctx.pool.inner().clone());

    let created = service
        .create(&property_input(
            &unique_name("Leer"),
            vec![building_input("Weg", "3", vec![unit_input("X", None)])],
        ))
        .await
        .expect("create failed");

    let mut snapshot = snapshot_from_tree(&created);
    snapshot.buildings = Some(vec![]);

    let updated = service
        .update(PropertyId::from_uuid(created.id), &snapshot)
        .await
        .expect("update failed");
    assert!(updated.buildings.is_empty());
    assert_eq!(ctx.count_buildings(created.id).await, 0);

    service.delete(PropertyId::from_uuid(created.id)).await.unwrap();
}

#[tokio::test]
async fn absent_child_list_leaves_the_level_untouched() {
    let ctx = PropertyTestContext::new().await;
    let service = PropertyService::new(ctx.pool.inner().clone());

    let created = service
        .create(&property_input(
            &unique_name("Ruhig"),
            vec![building_input("Still", "9", vec![])],
        ))
        .await
        .expect("create failed");

    let mut snapshot = snapshot_from_tree(&created);
    snapshot.name = unique_name("Umbenannt");
    snapshot.buildings = None;

    let updated = service
        .update(PropertyId::from_uuid(created.id), &snapshot)
        .await
        .expect("update failed");
    assert_eq!(updated.name, snapshot.name);
    assert_eq!(updated.buildings.len(), 1);

    service.delete(PropertyId::from_uuid(created.id)).await.unwrap();
}

// ===========================================================================
// Idempotence
// ===========================================================================

#[tokio::test]
async fn resubmitting_a_read_back_tree_changes_nothing() {
    let ctx = PropertyTestContext::new().await;
    let service = PropertyService::new(ctx.pool.inner().clone());

    let created = service
        .create(&property_input(
            &unique_name("Stabil"),
            vec![building_input(
                "Fest",
                "4",
                vec![unit_input("E1", Some("50")), unit_input("E2", None)],
            )],
        ))
        .await
        .expect("create failed");

    let snapshot = snapshot_from_tree(&created);
    let updated = service
        .update(PropertyId::from_uuid(created.id), &snapshot)
        .await
        .expect("idempotent update failed");

    // Same rows, same ids, no deletes and no inserts.
    let created_unit_ids: Vec<Uuid> =
        created.buildings[0].units.iter().map(|u| u.id).collect();
    let updated_unit_ids: Vec<Uuid> =
        updated.buildings[0].units.iter().map(|u| u.id).collect();
    assert_eq!(updated.buildings[0].id, created.buildings[0].id);
    assert_eq!(updated_unit_ids, created_unit_ids);
    assert_eq!(ctx.count_units(created.buildings[0].id).await, 2);

    service.delete(PropertyId::from_uuid(created.id)).await.unwrap();
}

// ===========================================================================
// Normalization and atomicity
// ===========================================================================

#[tokio::test]
async fn empty_numeric_strings_are_stored_as_null() {
    let ctx = PropertyTestContext::new().await;
    let service = PropertyService::new(ctx.pool.inner().clone());

    let created = service
        .create(&property_input(
            &unique_name("Null"),
            vec![building_input("Leer", "5", vec![unit_input("N1", Some(""))])],
        ))
        .await
        .expect("create failed");

    assert_eq!(created.buildings[0].units[0].size_sq_m, None);

    service.delete(PropertyId::from_uuid(created.id)).await.unwrap();
}

#[tokio::test]
async fn non_numeric_input_fails_the_whole_create() {
    let ctx = PropertyTestContext::new().await;
    let service = PropertyService::new(ctx.pool.inner().clone());

    let name = unique_name("Kaputt");
    // Five units; the third one carries a non-numeric size.
    let units = vec![
        unit_input("U1", Some("10")),
        unit_input("U2", Some("20")),
        unit_input("U3", Some("abc")),
        unit_input("U4", Some("40")),
        unit_input("U5", Some("50")),
    ];
    let err = service
        .create(&property_input(&name, vec![building_input("Bruch", "6", units)]))
        .await
        .expect_err("create should fail validation");

    match err {
        ApiPropertiesError::Validation { field, value } => {
            assert_eq!(field, "sizeSqM");
            assert_eq!(value, "abc");
        }
        other => panic!("expected Validation, got {other:?}"),
    }

    // Nothing survived the rollback: no property, no buildings, no units.
    assert_eq!(ctx.count_properties_named(&name).await, 0);
}

#[tokio::test]
async fn failing_unit_level_update_rolls_back_property_and_building_writes() {
    let ctx = PropertyTestContext::new().await;
    let service = PropertyService::new(ctx.pool.inner().clone());

    let original_name = unique_name("Vorher");
    let created = service
        .create(&property_input(
            &original_name,
            vec![building_input("Alt", "7", vec![unit_input("V1", Some("30"))])],
        ))
        .await
        .expect("create failed");

    let mut snapshot = snapshot_from_tree(&created);
    snapshot.name = unique_name("Nachher");
    let building = &mut snapshot.buildings.as_mut().unwrap()[0];
    building.street = "Neu".to_string();
    building.units.as_mut().unwrap()[0].rooms = Some(NumericInput::Text("viele".to_string()));

    let err = service
        .update(PropertyId::from_uuid(created.id), &snapshot)
        .await
        .expect_err("update should fail validation");
    assert!(matches!(err, ApiPropertiesError::Validation { field: "rooms", .. }));

    // The property and building writes from the same call were rolled back.
    let read = service
        .find_one(PropertyId::from_uuid(created.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(read.name, original_name);
    assert_eq!(read.buildings[0].street, "Alt");
    assert_eq!(read.buildings[0].units[0].rooms, None);

    service.delete(PropertyId::from_uuid(created.id)).await.unwrap();
}

// ===========================================================================
// Hardened child-id handling
// ===========================================================================

#[tokio::test]
async fn unknown_building_id_in_snapshot_is_not_found_and_writes_nothing() {
    let ctx = PropertyTestContext::new().await;
    let service = PropertyService::new(ctx.pool.inner().clone());

    let original_name = unique_name("Echt");
    let created = service
        .create(&property_input(&original_name, vec![]))
        .await
        .expect("create failed");

    let mut snapshot = snapshot_from_tree(&created);
    snapshot.name = unique_name("Gefaelscht");
    snapshot.buildings = Some(vec![{
        let mut building = building_input("X", "1", vec![]);
        building.id = Some(BuildingId::new());
        building
    }]);

    let err = service
        .update(PropertyId::from_uuid(created.id), &snapshot)
        .await
        .expect_err("spoofed id should be rejected");
    assert!(matches!(err, ApiPropertiesError::NotFound));

    // No row was minted with the attacker-chosen id, and the property update
    // was rolled back with the rest of the call.
    let read = service
        .find_one(PropertyId::from_uuid(created.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(read.name, original_name);
    assert_eq!(ctx.count_buildings(created.id).await, 0);

    service.delete(PropertyId::from_uuid(created.id)).await.unwrap();
}

#[tokio::test]
async fn updating_a_missing_property_is_not_found() {
    let ctx = PropertyTestContext::new().await;
    let service = PropertyService::new(ctx.pool.inner().clone());

    let err = service
        .update(PropertyId::new(), &property_input(&unique_name("Nix"), vec![]))
        .await
        .expect_err("update of missing property should fail");
    assert!(matches!(err, ApiPropertiesError::NotFound));
}

// ===========================================================================
// Delete and cascade
// ===========================================================================

#[tokio::test]
async fn deleting_a_property_cascades_through_both_levels() {
    let ctx = PropertyTestContext::new().await;
    let service = PropertyService::new(ctx.pool.inner().clone());

    let created = service
        .create(&property_input(
            &unique_name("Weg"),
            vec![building_input("Fort", "8", vec![unit_input("W1", None)])],
        ))
        .await
        .expect("create failed");
    let building_id = created.buildings[0].id;

    service
        .delete(PropertyId::from_uuid(created.id))
        .await
        .expect("delete failed");

    assert!(service
        .find_one(PropertyId::from_uuid(created.id))
        .await
        .unwrap()
        .is_none());
    assert_eq!(ctx.count_buildings(created.id).await, 0);
    assert_eq!(ctx.count_units(building_id).await, 0);

    let err = service
        .delete(PropertyId::from_uuid(created.id))
        .await
        .expect_err("second delete should fail");
    assert!(matches!(err, ApiPropertiesError::NotFound));
}
