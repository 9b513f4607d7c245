//! HTTP routing for the greeting server.
//!
//! There is exactly one handler. It is installed as the router's fallback so
//! it answers any method on any path, and the router is handed to the
//! listener by value; nothing is registered globally.

pub mod hello;

use axum::{middleware, Router};

use crate::middleware::request_id_layer;

/// Creates the router serving the greeting on every path.
///
/// `tls_mode` is recorded on every request span; pass the listener's
/// [`crate::tls::ServerTrust::mode_name`].
pub fn create_router(tls_mode: &'static str) -> Router {
    Router::new()
        .fallback(hello::hello)
        .layer(middleware::from_fn_with_state(tls_mode, request_id_layer))
}
