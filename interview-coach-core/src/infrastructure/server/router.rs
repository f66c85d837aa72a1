use super::auth::require_secret;
use super::docs::ApiDoc;
use super::error::ServerError;
use super::routes;
use super::state::ServerState;
use crate::application::pipeline::CritiquePipeline;
use crate::config::RestServerConfig;
use crate::constants::MAX_RESUME_BYTES;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::middleware;
use axum::routing::{get, post};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Largest accepted resume plus room for multipart framing.
const UPLOAD_BODY_LIMIT: usize = MAX_RESUME_BYTES + 1024 * 1024;

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(origin = origin.as_str(), %err, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Build the application router.
///
/// `secret` is the expected shared-secret value; `None` leaves every route open.
pub fn router(
    pipeline: CritiquePipeline,
    config: &RestServerConfig,
    secret: Option<String>,
) -> Result<Router, ServerError> {
    let state = Arc::new(ServerState::new(pipeline, &config.secret_header, secret)?);

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .route("/", get(routes::status::status_handler))
        .route(
            "/api/interview/analyze_stream",
            post(routes::interview::analyze_stream_handler),
        )
        .route("/api/interview/roles", get(routes::interview::roles_handler))
        .route(
            "/api/interview/questions",
            get(routes::interview::questions_handler),
        )
        .route(
            "/api/skills/match_skills",
            post(routes::skills::match_skills_handler),
        )
        .route(
            "/api/skills/upload_resume",
            post(routes::skills::upload_resume_handler)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_secret,
        ))
        .layer(cors_layer(&config.cors_origins))
        .with_state(state);

    Ok(app)
}

pub(super) async fn serve(
    pipeline: CritiquePipeline,
    config: &RestServerConfig,
    secret: Option<String>,
) -> Result<(), ServerError> {
    let addr = config.bind;
    let authenticated = secret.is_some();
    let app = router(pipeline, config, secret)?;
    info!(%addr, authenticated, "Binding REST server");

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(%addr, "REST server ready to accept connections");

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(ServerError::Serve)
}
