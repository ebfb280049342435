use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    #[default]
    InitialScan,
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovementType::InitialScan => write!(f, "initial_scan"),
        }
    }
}

impl std::str::FromStr for MovementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initial_scan" => Ok(MovementType::InitialScan),
            other => Err(format!("unknown movement type: {other}")),
        }
    }
}

/// Stock change for an item, as stored in `inventory_movements`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryMovement {
    pub id: String,
    pub item_id: String,
    pub quantity_change: i64,
    pub new_quantity: i64,
    pub created_at: DateTime<Utc>,
    pub scan_id: Option<String>,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
}

impl InventoryMovement {
    /// First movement for a newly created item: stock goes from 0 to `quantity`.
    pub fn initial(item_id: &str, scan_id: &str, quantity: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            item_id: item_id.to_string(),
            quantity_change: i64::from(quantity),
            new_quantity: i64::from(quantity),
            created_at: Utc::now(),
            scan_id: Some(scan_id.to_string()),
            movement_type: MovementType::InitialScan,
        }
    }
}
