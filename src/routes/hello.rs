//! The greeting endpoint.
//!
//! Every method and path gets the same answer, so what a test exercises is
//! the transport's trust configuration and nothing about HTTP routing.

use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::Extension;

use crate::config::{GREETING, GREETING_CONTENT_TYPE};
use crate::middleware::RequestId;

/// Greeting handler.
///
/// Returns 200 with [`GREETING`] regardless of method, path, headers or body.
/// The request id is inserted by [`crate::middleware::request_id_layer`],
/// which wraps this handler in [`super::create_router`].
pub async fn hello(Extension(RequestId(id)): Extension<RequestId>) -> impl IntoResponse {
    tracing::debug!(request_id = %id, "Sending greeting");
    ([(CONTENT_TYPE, GREETING_CONTENT_TYPE)], GREETING)
}
