use serde::{Deserialize, Serialize};

/// A recognized text fragment. The first fragment of an image is the full
/// text block; later fragments are individual words or lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    pub description: String,
    pub confidence: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LabelAnnotation {
    pub description: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ObjectAnnotation {
    pub name: String,
    pub confidence: f32,
}

/// Everything the OCR provider reported for one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    pub texts: Vec<TextAnnotation>,
    pub labels: Vec<LabelAnnotation>,
    pub objects: Vec<ObjectAnnotation>,
}

impl ImageAnalysis {
    pub fn full_text(&self) -> &str {
        self.texts
            .first()
            .map(|t| t.description.as_str())
            .unwrap_or("")
    }

    pub fn text_elements(&self) -> &[TextAnnotation] {
        self.texts.get(1..).unwrap_or(&[])
    }
}
