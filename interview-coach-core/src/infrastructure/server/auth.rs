//! Shared-secret header check.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::warn;

use super::state::ServerState;

fn is_public(path: &str) -> bool {
    path == "/" || path.starts_with("/swagger-ui") || path.starts_with("/api-doc")
}

pub(super) async fn require_secret(
    State(state): State<Arc<ServerState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.secret() else {
        return next.run(request).await;
    };
    if request.method() == Method::OPTIONS || is_public(request.uri().path()) {
        return next.run(request).await;
    }

    let provided = request
        .headers()
        .get(state.secret_header())
        .and_then(|value| value.to_str().ok());
    if provided == Some(expected) {
        return next.run(request).await;
    }

    warn!(
        path = request.uri().path(),
        header_present = provided.is_some(),
        "Rejected request with invalid secret"
    );
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Unauthorized: Invalid Secret" })),
    )
        .into_response()
}
