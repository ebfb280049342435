use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScanType {
    #[default]
    LabelScan,
}

impl std::fmt::Display for ScanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanType::LabelScan => write!(f, "label_scan"),
        }
    }
}

impl std::str::FromStr for ScanType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "label_scan" => Ok(ScanType::LabelScan),
            other => Err(format!("unknown scan type: {other}")),
        }
    }
}

/// One analyzed image, as stored in `inventory_scans`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub full_text: String,
    pub product_name: Option<String>,
    pub organization_id: Option<String>,
    pub scanned_by: Option<String>,
    pub scan_type: ScanType,
    pub quantity: u32,
    /// JSON text holding the product attributes plus label/object annotations.
    #[serde(
        default,
        deserialize_with = "analysis_data_from_any",
        skip_serializing_if = "Option::is_none"
    )]
    pub analysis_data: Option<String>,
}

/// Accepts the column either as JSON text or, from `jsonb` columns, as a
/// JSON value.
fn analysis_data_from_any<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(
        match Option::<serde_json::Value>::deserialize(deserializer)? {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(text)) => Some(text),
            Some(value) => Some(value.to_string()),
        },
    )
}

impl ScanRecord {
    pub fn new(full_text: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            full_text: full_text.into(),
            product_name: None,
            organization_id: None,
            scanned_by: None,
            scan_type: ScanType::default(),
            quantity,
            analysis_data: None,
        }
    }
}
