use axum::http::HeaderName;

use super::error::ServerError;
use crate::application::pipeline::CritiquePipeline;

pub(crate) struct ServerState {
    pipeline: CritiquePipeline,
    secret_header: HeaderName,
    secret: Option<String>,
}

impl ServerState {
    pub(crate) fn new(
        pipeline: CritiquePipeline,
        secret_header: &str,
        secret: Option<String>,
    ) -> Result<Self, ServerError> {
        let secret_header =
            HeaderName::from_bytes(secret_header.as_bytes()).map_err(|source| {
                ServerError::SecretHeader {
                    header: secret_header.to_string(),
                    source,
                }
            })?;
        Ok(Self {
            pipeline,
            secret_header,
            secret,
        })
    }

    pub(crate) fn pipeline(&self) -> &CritiquePipeline {
        &self.pipeline
    }

    pub(crate) fn secret_header(&self) -> &HeaderName {
        &self.secret_header
    }

    /// Expected shared secret. `None` disables authentication.
    pub(crate) fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }
}
