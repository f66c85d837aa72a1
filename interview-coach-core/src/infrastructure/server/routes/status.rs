use super::super::dto::StatusResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/",
    tag = "status",
    responses(
        (status = 200, description = "Service is running", body = StatusResponse)
    )
)]
pub async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "Interview Coach API is running!".to_string(),
        docs: "/swagger-ui".to_string(),
        status: "OK".to_string(),
    })
}
