use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;
use super::middleware::v1_auth_middleware;

pub fn v1_router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ping", get(handlers::ping))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router());

    let protected_routes = Router::new()
        .route("/analyze", post(handlers::analyze::analyze))
        .route(
            "/analyze-and-save",
            post(handlers::analyze::analyze_and_save),
        )
        .route(
            "/analyze-and-save-basic",
            post(handlers::analyze::analyze_and_save_basic),
        )
        .route("/scans/{scanId}", get(handlers::scans::get_scan))
        .route_layer(middleware::from_fn_with_state(state, v1_auth_middleware));

    Router::new().merge(public_routes).merge(protected_routes)
}
