//! Image annotation via Google Cloud Vision.
//!
//! `ImageAnnotator` is the seam the rest of the service depends on.
//! `VisionProvider` implements it on top of the REST client in `api`, and
//! degrades to an unavailable backend when no API key is configured so the
//! server still starts.

mod api;
mod preprocessing;
mod provider;
mod types;

pub use api::GoogleVisionClient;
pub use preprocessing::validate_image;
pub use provider::{ImageAnnotator, VisionProvider};
pub use types::{ImageAnalysis, LabelAnnotation, ObjectAnnotation, TextAnnotation};
