use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{ScanRecord, ScanType};

/// Response body for `GET /api/v1/scans/{scanId}`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ScanResponse {
    pub id: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    pub full_text: String,
    pub product_name: Option<String>,
    pub organization_id: Option<String>,
    pub scanned_by: Option<String>,
    pub scan_type: ScanType,
    pub quantity: u32,
    /// Stored product attributes plus label and object annotations.
    #[schema(value_type = Object)]
    pub analysis_data: Option<serde_json::Value>,
}

impl From<ScanRecord> for ScanResponse {
    fn from(scan: ScanRecord) -> Self {
        // Rows written by other clients may hold text that is not JSON.
        let analysis_data = scan.analysis_data.map(|raw| {
            serde_json::from_str(&raw).unwrap_or(serde_json::Value::String(raw))
        });

        Self {
            id: scan.id,
            created_at: scan.created_at,
            full_text: scan.full_text,
            product_name: scan.product_name,
            organization_id: scan.organization_id,
            scanned_by: scan.scanned_by,
            scan_type: scan.scan_type,
            quantity: scan.quantity,
            analysis_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_data_decoded() {
        let mut scan = ScanRecord::new("Nitrile", 4);
        scan.analysis_data = Some(r#"{"labels":[]}"#.to_string());

        let json = serde_json::to_value(ScanResponse::from(scan)).unwrap();
        assert_eq!(json["analysis_data"]["labels"], serde_json::json!([]));
        assert_eq!(json["scan_type"], "label_scan");
        assert_eq!(json["quantity"], 4);
    }

    #[test]
    fn test_non_json_analysis_data_kept_as_string() {
        let mut scan = ScanRecord::new("", 1);
        scan.analysis_data = Some("not json".to_string());

        let response = ScanResponse::from(scan);
        assert_eq!(
            response.analysis_data,
            Some(serde_json::Value::String("not json".to_string()))
        );
    }
}
