//! Database seeder.
//!
//! Clears existing properties, inserts demo contacts and creates ten demo
//! properties through the ordinary snapshot create path, so seeded data goes
//! through the same validation and reconciliation as client requests.
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo run -p hauskern-api --bin hauskern-seed
//! ```

use hauskern_api_properties::models::requests::{BuildingInput, PropertyInput, UnitInput};
use hauskern_api_properties::validation::NumericInput;
use hauskern_api_properties::PropertyService;
use hauskern_core::{AccountantId, ManagerId, PropertyId};
use hauskern_db::{run_migrations, Accountant, DbPool, ManagementType, Manager, UnitType};
use std::error::Error;

const MANAGERS: [(&str, &str); 2] = [
    ("John Smith", "john@hauskern.dev"),
    ("Sarah Connor", "sarah@hauskern.dev"),
];

const ACCOUNTANTS: [(&str, &str); 2] = [
    ("Michael Scott", "michael@hauskern.dev"),
    ("Pam Beesly", "pam@hauskern.dev"),
];

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Seeding failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| "DATABASE_URL must be set")?;

    let pool = DbPool::connect(&database_url).await?;
    run_migrations(&pool).await?;

    let service = PropertyService::new(pool.inner().clone());

    // Clean slate: remove existing properties (buildings and units cascade).
    let existing = service.find_all().await?;
    if !existing.is_empty() {
        tracing::info!(count = existing.len(), "Clearing existing properties");
        for tree in &existing {
            service.delete(PropertyId::from_uuid(tree.id)).await?;
        }
    }

    let mut manager_ids = Vec::new();
    for (name, email) in MANAGERS {
        let row = Manager::insert(pool.inner(), name, Some(email)).await?;
        manager_ids.push(ManagerId::from_uuid(row.id));
    }

    let mut accountant_ids = Vec::new();
    for (name, email) in ACCOUNTANTS {
        let row = Accountant::insert(pool.inner(), name, Some(email)).await?;
        accountant_ids.push(AccountantId::from_uuid(row.id));
    }

    tracing::info!("Seeding 10 demo properties");
    for i in 1..=10u32 {
        let input = demo_property(
            i,
            manager_ids[i as usize % manager_ids.len()],
            accountant_ids[i as usize % accountant_ids.len()],
        );
        let tree = service.create(&input).await?;
        tracing::info!(name = %tree.name, buildings = tree.buildings.len(), "Created property");
    }

    tracing::info!("Seeding complete");
    Ok(())
}

/// One demo property: a single building with five units, the first an office.
fn demo_property(i: u32, manager_id: ManagerId, accountant_id: AccountantId) -> PropertyInput {
    let units = (0..5u32)
        .map(|j| UnitInput {
            id: None,
            unit_number: format!("{i}{}", j + 1),
            unit_type: if j == 0 {
                UnitType::Office
            } else {
                UnitType::Apartment
            },
            floor: Some(format!("{}", j / 2 + 1)),
            entrance: Some("Main".to_string()),
            size_sq_m: Some(NumericInput::Float(f64::from(45 + 5 * j) + 0.5)),
            co_ownership_share: Some(NumericInput::Float(f64::from(10 + 2 * j))),
            rooms: Some(NumericInput::Float(f64::from(2 + j % 3))),
            construction_year: Some(NumericInput::Int(i64::from(2000 + i))),
        })
        .collect();

    PropertyInput {
        name: format!("Hauskern Plaza {i}"),
        management_type: if i % 2 == 0 {
            ManagementType::Weg
        } else {
            ManagementType::Mv
        },
        manager_id: Some(manager_id),
        accountant_id: Some(accountant_id),
        buildings: Some(vec![BuildingInput {
            id: None,
            name: Some(format!("Building {i}")),
            street: "Musterstraße".to_string(),
            house_number: format!("{}", 100 + i),
            postcode: Some("10115".to_string()),
            additional_info: None,
            units: Some(units),
        }]),
    }
}
