use axum::http::header::InvalidHeaderName;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid secret header name '{header}': {source}")]
    SecretHeader {
        header: String,
        #[source]
        source: InvalidHeaderName,
    },
    #[error("failed to bind HTTP listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP server error: {0}")]
    Serve(#[from] std::io::Error),
}
