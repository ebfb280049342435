use async_trait::async_trait;

use crate::error::Result;
use crate::models::{InventoryItem, InventoryMovement, ScanRecord};

// ---------------------------------------------------------------------------
// Individual store traits
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ScanStore: Send + Sync {
    async fn create_scan(&self, scan: &ScanRecord) -> Result<()>;
    async fn get_scan(&self, id: &str) -> Result<Option<ScanRecord>>;
}

#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn create_item(&self, item: &InventoryItem) -> Result<()>;
    async fn get_item(&self, id: &str) -> Result<Option<InventoryItem>>;
}

#[async_trait]
pub trait MovementStore: Send + Sync {
    async fn create_movement(&self, movement: &InventoryMovement) -> Result<()>;
    async fn list_movements_for_item(&self, item_id: &str) -> Result<Vec<InventoryMovement>>;
}

// ---------------------------------------------------------------------------
// Unified backend supertrait
// ---------------------------------------------------------------------------

/// Everything the scan service needs from a persistence backend.
#[async_trait]
pub trait InventoryBackend: ScanStore + ItemStore + MovementStore {
    /// Short backend identifier for logs and health output.
    fn name(&self) -> &'static str;

    /// Cheap connectivity check.
    async fn ping(&self) -> Result<()>;
}
