use libsql::{params, Connection};

use crate::error::Result;
use crate::models::{features_from_column, features_to_column, InventoryItem};

use super::{parse_timestamp, quantity_from_db};

pub struct ItemRepository;

impl ItemRepository {
    pub async fn create(conn: &Connection, item: &InventoryItem) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO inventory_items (
                id, name, description, brand, quantity, material, is_sterile,
                features, created_at, last_updated, last_scan_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                item.id.clone(),
                item.name.clone(),
                item.description.clone(),
                item.brand.clone(),
                i64::from(item.quantity),
                item.material.clone(),
                i64::from(item.is_sterile),
                features_to_column(&item.features),
                item.created_at.to_rfc3339(),
                item.last_updated.to_rfc3339(),
                item.last_scan_id.clone(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_by_id(conn: &Connection, id: &str) -> Result<Option<InventoryItem>> {
        let mut rows = conn
            .query(
                r#"
                SELECT id, name, description, brand, quantity, material, is_sterile,
                       features, created_at, last_updated, last_scan_id
                FROM inventory_items WHERE id = ?1
                "#,
                params![id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_item(&row)?))
        } else {
            Ok(None)
        }
    }

    fn row_to_item(row: &libsql::Row) -> Result<InventoryItem> {
        Ok(InventoryItem {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            brand: row.get(3)?,
            quantity: quantity_from_db(row.get::<i64>(4)?),
            material: row.get(5)?,
            is_sterile: row.get::<i64>(6)? != 0,
            features: features_from_column(&row.get::<String>(7)?),
            created_at: parse_timestamp(&row.get::<String>(8)?),
            last_updated: parse_timestamp(&row.get::<String>(9)?),
            last_scan_id: row.get(10)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{setup_test_db, ScanRepository};
    use crate::models::{Material, ProductAttributes, ScanRecord};

    #[tokio::test]
    async fn test_create_and_get_item() {
        let conn = setup_test_db().await;
        let scan = ScanRecord::new("Sterile Latex Cuffed Gloves", 1);
        ScanRepository::create(&conn, &scan).await.unwrap();

        let attrs = ProductAttributes {
            product_name: Some("Sterile Latex Surgical Gloves".to_string()),
            product_type: Some("surgical gloves".to_string()),
            material: Some(Material::Latex),
            is_sterile: true,
            features: vec!["sterile".to_string(), "cuffed".to_string()],
            ..Default::default()
        };
        let item = InventoryItem::from_attributes(&attrs, &scan.id).unwrap();
        ItemRepository::create(&conn, &item).await.unwrap();

        let fetched = ItemRepository::get_by_id(&conn, &item.id)
            .await
            .unwrap()
            .expect("item should exist");

        assert_eq!(fetched.name, "Sterile Latex Surgical Gloves");
        assert_eq!(fetched.description, "Dynarex latex surgical gloves");
        assert_eq!(fetched.material.as_deref(), Some("latex"));
        assert!(fetched.is_sterile);
        assert_eq!(fetched.features, vec!["sterile", "cuffed"]);
        assert_eq!(fetched.last_scan_id.as_deref(), Some(scan.id.as_str()));
    }
}
