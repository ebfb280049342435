use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Elio Vision API",
        version = "1.0.0",
        description = "Reads medical-supply labels with Google Cloud Vision and records scans in inventory.",
    ),
    paths(
        handlers::health::health_check,
        handlers::health::ping,
        handlers::analyze::analyze,
        handlers::analyze::analyze_and_save,
        handlers::analyze::analyze_and_save_basic,
        handlers::scans::get_scan,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        // Analysis
        dto::AnalysisResponse,
        dto::TextDetection,
        dto::TextElement,
        crate::models::ProductAttributes,
        crate::models::Material,
        crate::vision::LabelAnnotation,
        crate::vision::ObjectAnnotation,
        crate::services::ItemStatus,
        // Scans
        dto::ScanResponse,
        crate::models::ScanType,
        // Health (handler-local types)
        handlers::health::HealthData,
        handlers::health::VisionStatus,
        handlers::health::DatabaseStatus,
        handlers::health::PingData,
    )),
    tags(
        (name = "health", description = "Health and liveness checks"),
        (name = "scans", description = "Label analysis and stored scans"),
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            utoipa::openapi::security::SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
