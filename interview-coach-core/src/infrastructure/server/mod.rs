mod auth;
mod docs;
mod dto;
mod error;
mod router;
mod routes;
mod state;

pub use dto::{ErrorResponse, StatusResponse, UploadForm};
pub use error::ServerError;
pub use router::router;

use crate::application::pipeline::CritiquePipeline;
use crate::config::RestServerConfig;

/// Serve the REST API until the listener fails.
pub async fn serve(pipeline: CritiquePipeline, config: &RestServerConfig) -> Result<(), ServerError> {
    let secret = config.resolve_secret();
    router::serve(pipeline, config, secret).await
}
