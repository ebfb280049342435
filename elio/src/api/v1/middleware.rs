//! Bearer token authentication for v1 routes.
//!
//! Auth is opt-in: with `ELIO_API_KEYS` unset every route is open. Once keys
//! are configured, protected routes require `Authorization: Bearer <key>` and
//! failures use the v1 `ApiResponse` envelope.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::state::AppState;

use super::response::{ApiResponse, ErrorCode};

/// Axum middleware that enforces Bearer token authentication when API keys
/// are configured.
///
/// - No keys configured: request passes through.
/// - Missing or malformed `Authorization` header: 401.
/// - Token not in the configured key list: 401.
pub async fn v1_auth_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let api_keys = &state.config.server.api_keys;
    if api_keys.is_empty() {
        return next.run(request).await;
    }

    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(h) => match h.strip_prefix("Bearer ") {
            Some(token) => token,
            None => {
                return ApiResponse::<()>::error(
                    ErrorCode::Unauthorized,
                    "Invalid authorization header format. Expected: Bearer <token>",
                )
                .into_response();
            }
        },
        None => {
            return ApiResponse::<()>::error(
                ErrorCode::Unauthorized,
                "Missing authorization header",
            )
            .into_response();
        }
    };

    if api_keys.iter().any(|key| key == token) {
        next.run(request).await
    } else {
        ApiResponse::<()>::error(ErrorCode::Unauthorized, "Invalid API key").into_response()
    }
}
