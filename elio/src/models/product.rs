use serde::{Deserialize, Serialize};

pub const DEFAULT_BRAND: &str = "Dynarex";

/// Glove and supply materials recognized on labels, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    Nitrile,
    Latex,
    Vinyl,
    Polymer,
}

impl Material {
    pub const ALL: [Material; 4] = [
        Material::Nitrile,
        Material::Latex,
        Material::Vinyl,
        Material::Polymer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nitrile => "nitrile",
            Self::Latex => "latex",
            Self::Vinyl => "vinyl",
            Self::Polymer => "polymer",
        }
    }

    /// Capitalized form used in display names.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Nitrile => "Nitrile",
            Self::Latex => "Latex",
            Self::Vinyl => "Vinyl",
            Self::Polymer => "Polymer",
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product attributes guessed from the text printed on a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProductAttributes {
    pub product_name: Option<String>,
    pub brand: String,
    pub quantity: u32,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    /// Reserved; no rule currently detects a size.
    pub size: Option<String>,
    pub is_sterile: bool,
    pub material: Option<Material>,
    pub features: Vec<String>,
}

impl Default for ProductAttributes {
    fn default() -> Self {
        Self {
            product_name: None,
            brand: DEFAULT_BRAND.to_string(),
            quantity: 1,
            product_type: None,
            size: None,
            is_sterile: false,
            material: None,
            features: Vec::new(),
        }
    }
}

impl ProductAttributes {
    /// Short catalogue description, e.g. "Dynarex nitrile surgical gloves".
    pub fn description(&self) -> String {
        [
            Some(self.brand.as_str()),
            self.material.as_ref().map(Material::as_str),
            self.product_type.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_attributes() {
        let attrs = ProductAttributes::default();
        assert_eq!(attrs.brand, "Dynarex");
        assert_eq!(attrs.quantity, 1);
        assert!(attrs.features.is_empty());
    }

    #[test]
    fn test_serializes_type_and_null_size() {
        let attrs = ProductAttributes {
            product_type: Some("surgical gloves".to_string()),
            material: Some(Material::Latex),
            ..Default::default()
        };
        let json = serde_json::to_value(&attrs).unwrap();
        assert_eq!(json["type"], "surgical gloves");
        assert_eq!(json["material"], "latex");
        assert!(json["size"].is_null());
        assert!(json.get("product_type").is_none());
    }

    #[test]
    fn test_description_skips_missing_parts() {
        let mut attrs = ProductAttributes::default();
        assert_eq!(attrs.description(), "Dynarex");

        attrs.material = Some(Material::Nitrile);
        attrs.product_type = Some("surgical gloves".to_string());
        assert_eq!(attrs.description(), "Dynarex nitrile surgical gloves");
    }
}
