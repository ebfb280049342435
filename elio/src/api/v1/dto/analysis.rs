//! Wire format for the analyze endpoints.

use serde::Serialize;

use crate::models::ProductAttributes;
use crate::services::{ItemStatus, Persistence, ScanAnalysis};
use crate::vision::{LabelAnnotation, ObjectAnnotation, TextAnnotation};

pub const WARNING_DATABASE_DISABLED: &str = "Database not configured, results not saved";

/// One OCR span after the full text block.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct TextElement {
    pub text: String,
    pub confidence: Option<f32>,
}

impl From<&TextAnnotation> for TextElement {
    fn from(annotation: &TextAnnotation) -> Self {
        Self {
            text: annotation.description.clone(),
            confidence: annotation.confidence,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct TextDetection {
    pub full_text: String,
    /// Only returned by `POST /api/v1/analyze`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_elements: Option<Vec<TextElement>>,
}

/// Response body for the three analyze endpoints.
///
/// The save endpoints add `saved` plus either the stored IDs or a `warning`
/// explaining why nothing was stored. The analysis is returned either way.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct AnalysisResponse {
    pub product_info: ProductAttributes,
    pub text_detection: TextDetection,
    pub objects: Vec<ObjectAnnotation>,
    pub labels: Vec<LabelAnnotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_id: Option<String>,
    /// Present whenever `item_status` is; `null` when no item was identified.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub item_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_status: Option<ItemStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl AnalysisResponse {
    /// Analysis-only response, including the individual text spans.
    pub fn analysis(result: ScanAnalysis) -> Self {
        let elements = result
            .analysis
            .text_elements()
            .iter()
            .map(TextElement::from)
            .collect();
        let mut response = Self::base(result);
        response.text_detection.text_elements = Some(elements);
        response
    }

    /// Response for the save endpoints.
    pub fn persisted(result: ScanAnalysis, persistence: Persistence) -> Self {
        let mut response = Self::base(result);

        match persistence {
            Persistence::Disabled => {
                response.warning = Some(WARNING_DATABASE_DISABLED.to_string());
                response.saved = Some(false);
            }
            Persistence::Failed(reason) => {
                response.warning = Some(format!(
                    "Analysis successful but database save failed: {reason}"
                ));
                response.saved = Some(false);
            }
            Persistence::Saved(saved) => {
                response.scan_id = Some(saved.scan_id);
                response.item_id = saved.item_status.map(|_| saved.item_id);
                response.item_status = saved.item_status;
                response.saved = Some(true);
            }
        }

        response
    }

    fn base(result: ScanAnalysis) -> Self {
        let full_text = result.analysis.full_text().to_string();
        Self {
            product_info: result.product,
            text_detection: TextDetection {
                full_text,
                text_elements: None,
            },
            objects: result.analysis.objects,
            labels: result.analysis.labels,
            scan_id: None,
            item_id: None,
            item_status: None,
            saved: None,
            warning: None,
        }
    }
}
