use super::super::dto::{ApiError, ErrorResponse, api_error};
use super::super::state::ServerState;
use super::ndjson;
use crate::domain::types::{AnalyzeRequest, InterviewQuestion};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use std::sync::Arc;
use tracing::{error, info};

#[utoipa::path(
    post,
    path = "/api/interview/analyze_stream",
    tag = "interview",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "NDJSON stream of step, partial_update and result events", content_type = "application/x-ndjson", body = String),
        (status = 400, description = "Answer is empty", body = ErrorResponse),
        (status = 401, description = "Missing or wrong shared secret")
    )
)]
pub async fn analyze_stream_handler(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Response, ApiError> {
    if payload.student_answer.trim().is_empty() {
        error!("Rejecting analyze request due to empty answer");
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "student_answer cannot be empty",
        ));
    }
    info!(role = %payload.target_role, "Received analyze request");
    Ok(ndjson(state.pipeline().analyze_stream(payload)))
}

#[utoipa::path(
    get,
    path = "/api/interview/roles",
    tag = "interview",
    responses(
        (status = 200, description = "Known job roles", body = Vec<String>)
    )
)]
pub async fn roles_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let skills = Arc::clone(state.pipeline().skills());
    tokio::task::spawn_blocking(move || skills.roles())
        .await
        .map(Json)
        .map_err(|err| {
            error!(%err, "Roles lookup task failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "roles lookup failed")
        })
}

#[utoipa::path(
    get,
    path = "/api/interview/questions",
    tag = "interview",
    responses(
        (status = 200, description = "Saved interview questions", body = Vec<InterviewQuestion>)
    )
)]
pub async fn questions_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<InterviewQuestion>>, ApiError> {
    let skills = Arc::clone(state.pipeline().skills());
    tokio::task::spawn_blocking(move || skills.questions())
        .await
        .map(Json)
        .map_err(|err| {
            error!(%err, "Questions lookup task failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "questions lookup failed")
        })
}
