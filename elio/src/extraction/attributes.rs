use crate::models::{Material, ProductAttributes};
use crate::vision::TextAnnotation;

use super::quantity::infer_quantity;

const GLOVE_TYPE: &str = "surgical gloves";

/// Build product attributes from OCR output. The first annotation carries the
/// full text block of the image; the remaining spans are not consulted.
pub fn extract_attributes(texts: &[TextAnnotation]) -> ProductAttributes {
    let full_text = texts.first().map(|t| t.description.as_str()).unwrap_or("");
    extract_from_text(full_text)
}

pub fn extract_from_text(full_text: &str) -> ProductAttributes {
    let text = full_text.to_lowercase();
    let mut attrs = ProductAttributes::default();

    if text.contains("sterile") {
        attrs.is_sterile = true;
        attrs.features.push("sterile".to_string());
    }

    if text.contains("powder-free") || text.contains("powder free") {
        attrs.features.push("powder-free".to_string());
    }

    attrs.material = Material::ALL
        .into_iter()
        .find(|material| text.contains(material.as_str()));

    attrs.quantity = infer_quantity(&text);

    if text.contains("glove") {
        attrs.product_type = Some(GLOVE_TYPE.to_string());
        // "Sterile" is part of the catalogue name whether or not the label says so
        attrs.product_name = attrs
            .material
            .map(|material| format!("Sterile {} Surgical Gloves", material.title()));
    }

    if text.contains("cuffed") {
        attrs.features.push("cuffed".to_string());
    }

    attrs
}
