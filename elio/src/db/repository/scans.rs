use libsql::{params, Connection};

use crate::error::Result;
use crate::models::{ScanRecord, ScanType};

use super::{parse_timestamp, quantity_from_db};

pub struct ScanRepository;

impl ScanRepository {
    pub async fn create(conn: &Connection, scan: &ScanRecord) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO inventory_scans (
                id, created_at, full_text, product_name, organization_id,
                scanned_by, scan_type, quantity, analysis_data
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                scan.id.clone(),
                scan.created_at.to_rfc3339(),
                scan.full_text.clone(),
                scan.product_name.clone(),
                scan.organization_id.clone(),
                scan.scanned_by.clone(),
                scan.scan_type.to_string(),
                i64::from(scan.quantity),
                scan.analysis_data.clone(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_by_id(conn: &Connection, id: &str) -> Result<Option<ScanRecord>> {
        let mut rows = conn
            .query(
                r#"
                SELECT id, created_at, full_text, product_name, organization_id,
                       scanned_by, scan_type, quantity, analysis_data
                FROM inventory_scans WHERE id = ?1
                "#,
                params![id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_scan(&row)?))
        } else {
            Ok(None)
        }
    }

    fn row_to_scan(row: &libsql::Row) -> Result<ScanRecord> {
        Ok(ScanRecord {
            id: row.get(0)?,
            created_at: parse_timestamp(&row.get::<String>(1)?),
            full_text: row.get(2)?,
            product_name: row.get(3)?,
            organization_id: row.get(4)?,
            scanned_by: row.get(5)?,
            scan_type: row
                .get::<String>(6)?
                .parse()
                .unwrap_or(ScanType::LabelScan),
            quantity: quantity_from_db(row.get::<i64>(7)?),
            analysis_data: row.get(8)?,
        })
    }
}
