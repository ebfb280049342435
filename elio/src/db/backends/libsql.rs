use async_trait::async_trait;

use crate::db::connection::Database;
use crate::db::repository::{ItemRepository, MovementRepository, ScanRepository};
use crate::db::traits::{InventoryBackend, ItemStore, MovementStore, ScanStore};
use crate::error::Result;
use crate::models::{InventoryItem, InventoryMovement, ScanRecord};

pub struct LibSqlBackend {
    db: Database,
}

impl LibSqlBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ScanStore for LibSqlBackend {
    async fn create_scan(&self, scan: &ScanRecord) -> Result<()> {
        let conn = self.db.connect()?;
        ScanRepository::create(&conn, scan).await
    }
    async fn get_scan(&self, id: &str) -> Result<Option<ScanRecord>> {
        let conn = self.db.connect()?;
        ScanRepository::get_by_id(&conn, id).await
    }
}

#[async_trait]
impl ItemStore for LibSqlBackend {
    async fn create_item(&self, item: &InventoryItem) -> Result<()> {
        let conn = self.db.connect()?;
        ItemRepository::create(&conn, item).await
    }
    async fn get_item(&self, id: &str) -> Result<Option<InventoryItem>> {
        let conn = self.db.connect()?;
        ItemRepository::get_by_id(&conn, id).await
    }
}

#[async_trait]
impl MovementStore for LibSqlBackend {
    async fn create_movement(&self, movement: &InventoryMovement) -> Result<()> {
        let conn = self.db.connect()?;
        MovementRepository::create(&conn, movement).await
    }
    async fn list_movements_for_item(&self, item_id: &str) -> Result<Vec<InventoryMovement>> {
        let conn = self.db.connect()?;
        MovementRepository::list_by_item(&conn, item_id).await
    }
}

#[async_trait]
impl InventoryBackend for LibSqlBackend {
    fn name(&self) -> &'static str {
        "libsql"
    }

    async fn ping(&self) -> Result<()> {
        self.db.sync().await?;
        let conn = self.db.connect()?;
        let mut rows = conn.query("SELECT 1", ()).await?;
        rows.next().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, DatabaseKind, SqlitePragmas};

    async fn setup_test_db() -> (LibSqlBackend, tempfile::TempDir) {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let db_path = temp_dir.path().join("backend_test.db");

        let config = DatabaseConfig {
            kind: DatabaseKind::LibSql,
            url: format!("file:{}", db_path.display()),
            auth_token: None,
            local_path: None,
            timeout_secs: 5,
            pragmas: SqlitePragmas::default(),
        };
        let db = Database::new(&config)
            .await
            .expect("Failed to create database");

        (LibSqlBackend::new(db), temp_dir)
    }

    #[tokio::test]
    async fn test_ping_local_database() {
        let (backend, _dir) = setup_test_db().await;
        assert!(backend.ping().await.is_ok());
        assert_eq!(backend.name(), "libsql");
    }

    #[tokio::test]
    async fn test_scan_persists_across_connections() {
        let (backend, _dir) = setup_test_db().await;
        let scan = ScanRecord::new("Latex Gloves", 1);

        backend.create_scan(&scan).await.unwrap();
        let fetched = backend.get_scan(&scan.id).await.unwrap();
        assert_eq!(fetched.map(|s| s.full_text), Some("Latex Gloves".to_string()));
    }
}
