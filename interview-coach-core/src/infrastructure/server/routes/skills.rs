use super::super::dto::{ApiError, ErrorResponse, UploadForm, api_error};
use super::super::state::ServerState;
use super::ndjson;
use crate::application::pipeline::UploadRejection;
use crate::domain::types::{MatchRequest, ResumeUpload};
use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Response;
use std::sync::Arc;
use tracing::{error, info, warn};

#[utoipa::path(
    post,
    path = "/api/skills/match_skills",
    tag = "skills",
    request_body = MatchRequest,
    responses(
        (status = 200, description = "NDJSON stream of status and result events", content_type = "application/x-ndjson", body = String),
        (status = 400, description = "Resume text is empty", body = ErrorResponse),
        (status = 401, description = "Missing or wrong shared secret")
    )
)]
pub async fn match_skills_handler(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<MatchRequest>,
) -> Result<Response, ApiError> {
    if payload.resume_text.trim().is_empty() {
        error!("Rejecting match request due to empty resume");
        return Err(api_error(StatusCode::BAD_REQUEST, "resume_text cannot be empty"));
    }
    info!(role = %payload.target_role, "Received skill match request");
    Ok(ndjson(state.pipeline().match_skills_stream(payload)))
}

const PDF_MIME: &str = "application/pdf";
const UPLOAD_FIELD: &str = "file";

fn multipart_error(err: MultipartError) -> ApiError {
    warn!(%err, "Malformed multipart upload");
    api_error(err.status(), err.body_text())
}

fn rejection_status(rejection: &UploadRejection) -> StatusCode {
    match rejection {
        UploadRejection::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        UploadRejection::Orchestration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        UploadRejection::NotPdf | UploadRejection::Unreadable | UploadRejection::NotAResume(_) => {
            StatusCode::BAD_REQUEST
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/skills/upload_resume",
    tag = "skills",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Extracted resume text, or a scanned-image warning", body = ResumeUpload),
        (status = 400, description = "Not a PDF, unreadable, or not a resume", body = ErrorResponse),
        (status = 401, description = "Missing or wrong shared secret"),
        (status = 413, description = "File larger than 5MB", body = ErrorResponse)
    )
)]
pub async fn upload_resume_handler(
    State(state): State<Arc<ServerState>>,
    mut multipart: Multipart,
) -> Result<Json<ResumeUpload>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("resume.pdf").to_string();
        let content_type = field.content_type().map(str::to_string);
        info!(filename = %filename, content_type = ?content_type, "Received resume upload");

        if content_type.as_deref() != Some(PDF_MIME) {
            error!(filename = %filename, "Rejecting upload with non-PDF content type");
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "Invalid file type. Only PDF allowed.",
            ));
        }

        let bytes = field.bytes().await.map_err(multipart_error)?;
        return state
            .pipeline()
            .ingest_resume(&filename, bytes.to_vec())
            .await
            .map(Json)
            .map_err(|rejection| {
                let status = rejection_status(&rejection);
                if status.is_server_error() {
                    error!(error = %rejection, "Resume upload failed");
                }
                api_error(status, rejection.to_string())
            });
    }
    error!("Rejecting upload without a file field");
    Err(api_error(StatusCode::BAD_REQUEST, "No file uploaded."))
}
