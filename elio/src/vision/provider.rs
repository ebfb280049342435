use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::VisionConfig;
use crate::error::{ElioError, Result};

use super::api::GoogleVisionClient;
use super::types::ImageAnalysis;

/// Detects text, labels and objects in an image.
#[async_trait]
pub trait ImageAnnotator: Send + Sync {
    async fn annotate(&self, image_bytes: &[u8]) -> Result<ImageAnalysis>;

    fn is_available(&self) -> bool;
}

#[derive(Clone)]
enum VisionBackend {
    Api { client: GoogleVisionClient },
    Unavailable { reason: String },
}

#[derive(Clone)]
pub struct VisionProvider {
    backend: VisionBackend,
    config: VisionConfig,
}

impl VisionProvider {
    pub fn new(config: &VisionConfig) -> Self {
        let backend = match GoogleVisionClient::new(config) {
            Ok(client) => {
                info!(base_url = %config.base_url, "Google Vision API backend initialized");
                VisionBackend::Api { client }
            }
            Err(e) => {
                let reason = format!("Google Vision backend unavailable: {e}");
                warn!("{}", reason);
                VisionBackend::Unavailable { reason }
            }
        };

        Self {
            backend,
            config: config.clone(),
        }
    }

    async fn annotate_internal(&self, image_bytes: &[u8]) -> Result<ImageAnalysis> {
        match &self.backend {
            VisionBackend::Api { client } => client.annotate(image_bytes).await,
            VisionBackend::Unavailable { reason } => {
                Err(ElioError::VisionUnavailable(reason.clone()))
            }
        }
    }
}

#[async_trait]
impl ImageAnnotator for VisionProvider {
    async fn annotate(&self, image_bytes: &[u8]) -> Result<ImageAnalysis> {
        let timeout_duration = Duration::from_secs(self.config.timeout_secs);

        match tokio::time::timeout(timeout_duration, self.annotate_internal(image_bytes)).await {
            Ok(inner_result) => inner_result,
            Err(_) => Err(ElioError::Vision(format!(
                "Vision request timed out after {} seconds",
                self.config.timeout_secs
            ))),
        }
    }

    fn is_available(&self) -> bool {
        !matches!(self.backend, VisionBackend::Unavailable { .. })
    }
}
