use axum::extract::{Multipart, State};

use crate::api::state::AppState;
use crate::api::v1::dto::AnalysisResponse;
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::error::{ElioError, Result};
use crate::services::{SaveMode, ScanContext};
use crate::vision::validate_image;

/// Fields accepted by the analyze endpoints.
#[derive(Debug, Default)]
struct UploadForm {
    image: Option<Vec<u8>>,
    user_id: Option<String>,
    organization_id: Option<String>,
}

impl UploadForm {
    fn context(&self) -> ScanContext {
        ScanContext {
            user_id: self.user_id.clone(),
            organization_id: self.organization_id.clone(),
        }
    }
}

async fn read_form(multipart: &mut Multipart) -> Result<UploadForm> {
    let mut form = UploadForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(ElioError::Validation(format!("Invalid multipart body: {e}")));
            }
        };
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ElioError::Validation(format!("Failed to read image: {e}")))?;
                form.image = Some(bytes.to_vec());
            }
            "user_id" | "organization_id" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ElioError::Validation(format!("Invalid {name}: {e}")))?;
                let value = Some(value.trim().to_string()).filter(|v| !v.is_empty());
                if name == "user_id" {
                    form.user_id = value;
                } else {
                    form.organization_id = value;
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Read the form and check the image before anything leaves the server.
async fn read_image_form(
    state: &AppState,
    multipart: &mut Multipart,
) -> Result<(UploadForm, Vec<u8>)> {
    let mut form = read_form(multipart).await?;
    let image = form
        .image
        .take()
        .ok_or_else(|| ElioError::Validation("No image provided".to_string()))?;

    let mime = validate_image(&image, state.config.server.max_upload_bytes)?;
    tracing::debug!(mime, bytes = image.len(), "Accepted image upload");

    Ok((form, image))
}

/// `POST /api/v1/analyze`
///
/// Runs OCR and attribute extraction without saving anything.
#[utoipa::path(
    post,
    path = "/api/v1/analyze",
    tag = "scans",
    operation_id = "scans.analyze",
    request_body(content_type = "multipart/form-data", content = String, description = "Image upload in the `image` field"),
    responses(
        (status = 200, description = "Image analyzed", body = AnalysisResponse),
        (status = 400, description = "Missing or unsupported image", body = ApiError),
        (status = 501, description = "OCR provider not configured", body = ApiError),
    )
)]
pub async fn analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResponse<AnalysisResponse> {
    let (_, image) = match read_image_form(&state, &mut multipart).await {
        Ok(upload) => upload,
        Err(e) => return e.into(),
    };

    match state.scans.analyze(&image).await {
        Ok(result) => ApiResponse::success(AnalysisResponse::analysis(result)),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/analyze-and-save`
///
/// Analyzes the image and stores the scan. When a product is identified an
/// inventory item and its initial movement are stored as well.
#[utoipa::path(
    post,
    path = "/api/v1/analyze-and-save",
    tag = "scans",
    operation_id = "scans.analyzeAndSave",
    request_body(content_type = "multipart/form-data", content = String, description = "Image upload in the `image` field, optional `user_id` and `organization_id`"),
    responses(
        (status = 200, description = "Image analyzed; see `saved` and `warning` for storage outcome", body = AnalysisResponse),
        (status = 400, description = "Missing or unsupported image", body = ApiError),
        (status = 501, description = "OCR provider not configured", body = ApiError),
    )
)]
pub async fn analyze_and_save(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResponse<AnalysisResponse> {
    save(state, multipart, SaveMode::Full).await
}

/// `POST /api/v1/analyze-and-save-basic`
///
/// Stores only the scan row, without the analysis payload.
#[utoipa::path(
    post,
    path = "/api/v1/analyze-and-save-basic",
    tag = "scans",
    operation_id = "scans.analyzeAndSaveBasic",
    request_body(content_type = "multipart/form-data", content = String, description = "Image upload in the `image` field, optional `user_id` and `organization_id`"),
    responses(
        (status = 200, description = "Image analyzed; see `saved` and `warning` for storage outcome", body = AnalysisResponse),
        (status = 400, description = "Missing or unsupported image", body = ApiError),
        (status = 501, description = "OCR provider not configured", body = ApiError),
    )
)]
pub async fn analyze_and_save_basic(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResponse<AnalysisResponse> {
    save(state, multipart, SaveMode::Basic).await
}

async fn save(
    state: AppState,
    mut multipart: Multipart,
    mode: SaveMode,
) -> ApiResponse<AnalysisResponse> {
    let (form, image) = match read_image_form(&state, &mut multipart).await {
        Ok(upload) => upload,
        Err(e) => return e.into(),
    };

    match state.scans.analyze_and_save(&image, form.context(), mode).await {
        Ok((result, persistence)) => {
            ApiResponse::success(AnalysisResponse::persisted(result, persistence))
        }
        Err(e) => e.into(),
    }
}
