use axum::extract::{Path, State};

use crate::api::state::AppState;
use crate::api::v1::dto::ScanResponse;
use crate::api::v1::response::{ApiError, ApiResponse};

/// `GET /api/v1/scans/{scanId}`
#[utoipa::path(
    get,
    path = "/api/v1/scans/{scanId}",
    tag = "scans",
    operation_id = "scans.get",
    params(("scanId" = String, Path, description = "Scan ID")),
    responses(
        (status = 200, description = "Stored scan", body = ScanResponse),
        (status = 404, description = "Scan not found or no database configured", body = ApiError),
    )
)]
pub async fn get_scan(
    State(state): State<AppState>,
    Path(scan_id): Path<String>,
) -> ApiResponse<ScanResponse> {
    match state.scans.get_scan(&scan_id).await {
        Ok(scan) => ApiResponse::success(ScanResponse::from(scan)),
        Err(e) => e.into(),
    }
}
