pub mod migrations;
pub mod queries;

use anyhow::Context;
use rusqlite::Connection;

use crate::models::Equipment;

pub fn init_db(path: &str) -> anyhow::Result<Connection> {
    let conn = Connection::open(path).context("failed to open database")?;

    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
        .context("failed to set database pragmas")?;

    migrations::run_migrations(&conn)?;

    Ok(conn)
}

/// Seed the equipment catalog on first run so a fresh install has items to
/// book against. Does nothing once the table has rows.
pub fn seed_catalog(conn: &Connection) -> anyhow::Result<()> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM equipment", [], |row| row.get(0))?;
    if count > 0 {
        return Ok(());
    }

    let catalog = [
        ("eq-001", "Canon EOS R5", "Camera", "Professional mirrorless camera", 50.0, true),
        ("eq-002", "Sony FX6", "Camera", "Cinema camera", 75.0, true),
        ("eq-003", "ARRI Alexa Mini", "Camera", "Professional cinema camera", 100.0, false),
        ("eq-004", "DJI Ronin RS3", "Stabilizer", "3-axis gimbal stabilizer", 25.0, true),
        ("eq-005", "LED Panel Kit", "Lighting", "3-point LED lighting kit", 30.0, true),
    ];

    for (id, name, category, description, price_per_hour, is_available) in catalog {
        queries::insert_equipment(
            conn,
            &Equipment {
                id: id.to_string(),
                name: name.to_string(),
                category: category.to_string(),
                description: description.to_string(),
                price_per_hour,
                is_available,
                maintenance_due: 0,
            },
        )?;
    }

    tracing::info!(items = catalog.len(), "seeded equipment catalog");
    Ok(())
}
