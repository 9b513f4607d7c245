//! Request ID middleware for correlating logs with requests.
//!
//! Generates a UUID v4 for each incoming request and wraps the request in a
//! tracing span. The span also carries the listener's trust mode, so a log
//! line for a request shows whether it arrived over plain HTTP, server-auth
//! TLS, or a mutually authenticated connection.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// Extension type for accessing the request ID in handlers.
#[derive(Clone, Debug)]
pub struct RequestId(pub Uuid);

/// Middleware that generates a request ID and creates a request span.
///
/// `tls_mode` is the [`crate::tls::ServerTrust::mode_name`] of the listener
/// the router is served on. In mutual mode every request reaching this point
/// has already presented a client certificate issued by the configured CA.
pub async fn request_id_layer(
    State(tls_mode): State<&'static str>,
    request: Request,
    next: Next,
) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        tls_mode,
        method = %method,
        path = %path,
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();

    let mut request = request;
    request.extensions_mut().insert(RequestId(request_id));

    async move {
        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        // Record duration and log completion with status code
        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms,
            "Request completed"
        );

        response
    }
    .instrument(span)
    .await
}
