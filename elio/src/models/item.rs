use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ProductAttributes;

/// A catalogued product, as stored in `inventory_items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub brand: String,
    pub quantity: u32,
    pub material: Option<String>,
    pub is_sterile: bool,
    /// Stored as a single comma-separated column.
    #[serde(serialize_with = "join_features", deserialize_with = "split_features")]
    pub features: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub last_scan_id: Option<String>,
}

impl InventoryItem {
    /// Item for a freshly identified product. Returns `None` when the product
    /// has no name to catalogue it under.
    pub fn from_attributes(attrs: &ProductAttributes, scan_id: &str) -> Option<Self> {
        let name = attrs.product_name.clone()?;
        let now = Utc::now();

        Some(Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            description: attrs.description(),
            brand: attrs.brand.clone(),
            quantity: attrs.quantity,
            material: attrs.material.map(|m| m.as_str().to_string()),
            is_sterile: attrs.is_sterile,
            features: attrs.features.clone(),
            created_at: now,
            last_updated: now,
            last_scan_id: Some(scan_id.to_string()),
        })
    }
}

pub fn features_to_column(features: &[String]) -> String {
    features.join(",")
}

pub fn features_from_column(column: &str) -> Vec<String> {
    column
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

#[allow(clippy::ptr_arg)]
fn join_features<S: Serializer>(features: &Vec<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&features_to_column(features))
}

fn split_features<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let column = Option::<String>::deserialize(deserializer)?;
    Ok(column.as_deref().map(features_from_column).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Material;

    fn glove_attrs() -> ProductAttributes {
        ProductAttributes {
            product_name: Some("Sterile Nitrile Surgical Gloves".to_string()),
            product_type: Some("surgical gloves".to_string()),
            material: Some(Material::Nitrile),
            is_sterile: true,
            quantity: 100,
            features: vec!["sterile".to_string(), "cuffed".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_item_requires_product_name() {
        let attrs = ProductAttributes::default();
        assert!(InventoryItem::from_attributes(&attrs, "scan-1").is_none());
    }

    #[test]
    fn test_item_from_attributes() {
        let item = InventoryItem::from_attributes(&glove_attrs(), "scan-1").unwrap();
        assert_eq!(item.name, "Sterile Nitrile Surgical Gloves");
        assert_eq!(item.description, "Dynarex nitrile surgical gloves");
        assert_eq!(item.material.as_deref(), Some("nitrile"));
        assert_eq!(item.quantity, 100);
        assert_eq!(item.last_scan_id.as_deref(), Some("scan-1"));
    }

    #[test]
    fn test_features_serialize_comma_joined() {
        let item = InventoryItem::from_attributes(&glove_attrs(), "scan-1").unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["features"], "sterile,cuffed");

        let back: InventoryItem = serde_json::from_value(json).unwrap();
        assert_eq!(back.features, vec!["sterile", "cuffed"]);
    }

    #[test]
    fn test_empty_feature_column() {
        assert!(features_from_column("").is_empty());
        assert_eq!(features_from_column("a,,b"), vec!["a", "b"]);
    }
}
