use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::v1::response::ApiResponse;

/// Health data returned inside the v1 envelope.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub vision: VisionStatus,
    pub database: DatabaseStatus,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct VisionStatus {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct DatabaseStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct PingData {
    pub message: String,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
}

/// `GET /api/v1/health`
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health status", body = HealthData),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthData> {
    let vision = VisionStatus {
        status: if state.annotator.is_available() {
            "available"
        } else {
            "unavailable"
        }
        .to_string(),
    };

    let database = match &state.store {
        None => DatabaseStatus {
            status: "disabled".to_string(),
            backend: None,
        },
        Some(store) => match store.ping().await {
            Ok(()) => DatabaseStatus {
                status: "ok".to_string(),
                backend: Some(store.name().to_string()),
            },
            Err(e) => {
                tracing::warn!(error = %e, backend = store.name(), "Database health check failed");
                DatabaseStatus {
                    status: "error".to_string(),
                    backend: Some(store.name().to_string()),
                }
            }
        },
    };

    ApiResponse::success(HealthData {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        vision,
        database,
    })
}

/// `GET /api/v1/ping`
#[utoipa::path(
    get,
    path = "/api/v1/ping",
    tag = "health",
    responses(
        (status = 200, description = "Liveness probe", body = PingData),
    )
)]
pub async fn ping() -> ApiResponse<PingData> {
    ApiResponse::success(PingData {
        message: "App is running successfully!".to_string(),
        timestamp: Utc::now(),
    })
}
