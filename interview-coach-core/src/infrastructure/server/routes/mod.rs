pub mod interview;
pub mod skills;
pub mod status;

use axum::body::Body;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use tokio_stream::wrappers::ReceiverStream;

use crate::application::pipeline::StreamEvent;

/// Stream pipeline events to the client as newline-delimited JSON.
fn ndjson(events: ReceiverStream<StreamEvent>) -> Response {
    let body = Body::from_stream(events.map(|event| event.to_ndjson()));
    ([(header::CONTENT_TYPE, "application/x-ndjson")], body).into_response()
}
