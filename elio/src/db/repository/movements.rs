use libsql::{params, Connection};

use crate::error::Result;
use crate::models::{InventoryMovement, MovementType};

use super::parse_timestamp;

pub struct MovementRepository;

impl MovementRepository {
    pub async fn create(conn: &Connection, movement: &InventoryMovement) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO inventory_movements (
                id, item_id, quantity_change, new_quantity, created_at, scan_id, type
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                movement.id.clone(),
                movement.item_id.clone(),
                movement.quantity_change,
                movement.new_quantity,
                movement.created_at.to_rfc3339(),
                movement.scan_id.clone(),
                movement.movement_type.to_string(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn list_by_item(conn: &Connection, item_id: &str) -> Result<Vec<InventoryMovement>> {
        let mut rows = conn
            .query(
                r#"
                SELECT id, item_id, quantity_change, new_quantity, created_at, scan_id, type
                FROM inventory_movements WHERE item_id = ?1
                ORDER BY created_at ASC
                "#,
                params![item_id],
            )
            .await?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(Self::row_to_movement(&row)?);
        }
        Ok(results)
    }

    fn row_to_movement(row: &libsql::Row) -> Result<InventoryMovement> {
        Ok(InventoryMovement {
            id: row.get(0)?,
            item_id: row.get(1)?,
            quantity_change: row.get(2)?,
            new_quantity: row.get(3)?,
            created_at: parse_timestamp(&row.get::<String>(4)?),
            scan_id: row.get(5)?,
            movement_type: row
                .get::<String>(6)?
                .parse()
                .unwrap_or(MovementType::InitialScan),
        })
    }
}
