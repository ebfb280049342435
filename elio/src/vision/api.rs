use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::VisionConfig;
use crate::error::{ElioError, Result};

use super::types::{ImageAnalysis, LabelAnnotation, ObjectAnnotation, TextAnnotation};

/// Google Cloud Vision `images:annotate` client authenticated with an API key.
#[derive(Clone, Debug)]
pub struct GoogleVisionClient {
    client: Client,
    api_key: String,
    base_url: String,
    max_retries: u32,
    max_results: u32,
}

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<ImageRequest>,
}

#[derive(Debug, Serialize)]
struct ImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature {
    #[serde(rename = "type")]
    feature_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_results: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<ImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageResponse {
    #[serde(default)]
    text_annotations: Vec<EntityAnnotation>,
    #[serde(default)]
    label_annotations: Vec<EntityAnnotation>,
    #[serde(default)]
    localized_object_annotations: Vec<LocalizedObject>,
    error: Option<ResponseStatus>,
}

#[derive(Debug, Deserialize)]
struct EntityAnnotation {
    #[serde(default)]
    description: String,
    score: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct LocalizedObject {
    #[serde(default)]
    name: String,
    #[serde(default)]
    score: f32,
}

#[derive(Debug, Deserialize)]
struct ResponseStatus {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

impl From<ImageResponse> for ImageAnalysis {
    fn from(response: ImageResponse) -> Self {
        Self {
            texts: response
                .text_annotations
                .into_iter()
                .map(|t| TextAnnotation {
                    description: t.description,
                    confidence: t.score,
                })
                .collect(),
            labels: response
                .label_annotations
                .into_iter()
                .map(|l| LabelAnnotation {
                    description: l.description,
                    confidence: l.score.unwrap_or_default(),
                })
                .collect(),
            objects: response
                .localized_object_annotations
                .into_iter()
                .map(|o| ObjectAnnotation {
                    name: o.name,
                    confidence: o.score,
                })
                .collect(),
        }
    }
}

impl GoogleVisionClient {
    pub fn new(config: &VisionConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| ElioError::Vision("API key required for Google Vision".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ElioError::Vision(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
            max_results: config.max_results,
        })
    }

    /// Run text, label and object detection on one image in a single request.
    pub async fn annotate(&self, image_bytes: &[u8]) -> Result<ImageAnalysis> {
        let request = AnnotateRequest {
            requests: vec![ImageRequest {
                image: ImageContent {
                    content: STANDARD.encode(image_bytes),
                },
                features: vec![
                    Feature {
                        feature_type: "TEXT_DETECTION",
                        max_results: None,
                    },
                    Feature {
                        feature_type: "LABEL_DETECTION",
                        max_results: Some(self.max_results),
                    },
                    Feature {
                        feature_type: "OBJECT_LOCALIZATION",
                        max_results: Some(self.max_results),
                    },
                ],
            }],
        };

        let response = self.make_request(&request).await?;
        let image = response.responses.into_iter().next().unwrap_or_default();

        if let Some(status) = &image.error {
            return Err(ElioError::Vision(format!(
                "Vision API rejected image (code {}): {}",
                status.code, status.message
            )));
        }

        Ok(image.into())
    }

    async fn make_request(&self, request: &AnnotateRequest) -> Result<AnnotateResponse> {
        let url = format!("{}/images:annotate", self.base_url);
        let mut retries = 0;

        loop {
            let response = self
                .client
                .post(&url)
                .query(&[("key", self.api_key.as_str())])
                .json(request)
                .send()
                .await;

            match response {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return resp.json().await.map_err(|e| {
                            ElioError::Vision(format!("Failed to parse response: {e}"))
                        });
                    } else if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                        retries += 1;
                        if retries > self.max_retries {
                            return Err(ElioError::Vision(format!(
                                "API request failed after {} retries: {}",
                                self.max_retries, status
                            )));
                        }
                        tracing::debug!(%status, attempt = retries, "Vision API busy, retrying");
                        tokio::time::sleep(backoff_delay(retries)).await;
                    } else {
                        let body = resp.text().await.unwrap_or_default();
                        return Err(ElioError::Vision(format!(
                            "API request failed: {status} - {body}"
                        )));
                    }
                }
                Err(e) => {
                    retries += 1;
                    if retries > self.max_retries {
                        return Err(ElioError::Vision(format!(
                            "API request failed after {} retries: {e}",
                            self.max_retries
                        )));
                    }
                    tracing::debug!(error = %e, attempt = retries, "Vision API request error, retrying");
                    tokio::time::sleep(backoff_delay(retries)).await;
                }
            }
        }
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(100 * 2_u64.pow(attempt.min(10)))
}
