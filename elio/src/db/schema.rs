use libsql::Connection;

use crate::error::Result;

pub async fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- One row per analyzed image
        CREATE TABLE IF NOT EXISTS inventory_scans (
            id TEXT PRIMARY KEY,
            created_at TEXT NOT NULL,
            full_text TEXT NOT NULL DEFAULT '',
            product_name TEXT,
            organization_id TEXT,
            scanned_by TEXT,
            scan_type TEXT NOT NULL DEFAULT 'label_scan',
            quantity INTEGER NOT NULL DEFAULT 1,
            analysis_data TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_inventory_scans_organization_id ON inventory_scans(organization_id);
        CREATE INDEX IF NOT EXISTS idx_inventory_scans_created_at ON inventory_scans(created_at);

        -- Catalogued products
        CREATE TABLE IF NOT EXISTS inventory_items (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            brand TEXT NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 1,
            material TEXT,
            is_sterile INTEGER NOT NULL DEFAULT 0,
            features TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            last_updated TEXT NOT NULL,
            last_scan_id TEXT,
            FOREIGN KEY (last_scan_id) REFERENCES inventory_scans(id)
        );

        CREATE INDEX IF NOT EXISTS idx_inventory_items_name ON inventory_items(name);

        -- Stock changes per item
        CREATE TABLE IF NOT EXISTS inventory_movements (
            id TEXT PRIMARY KEY,
            item_id TEXT NOT NULL,
            quantity_change INTEGER NOT NULL,
            new_quantity INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            scan_id TEXT,
            type TEXT NOT NULL DEFAULT 'initial_scan',
            FOREIGN KEY (item_id) REFERENCES inventory_items(id) ON DELETE CASCADE,
            FOREIGN KEY (scan_id) REFERENCES inventory_scans(id)
        );

        CREATE INDEX IF NOT EXISTS idx_inventory_movements_item_id ON inventory_movements(item_id);
        "#,
    )
    .await?;

    Ok(())
}
