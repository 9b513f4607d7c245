//! HTTP/HTTPS server startup logic.
//!
//! The trust configuration is resolved completely (every certificate and key
//! read and checked) before the listener socket is bound, so a bad file never
//! leaves a half-started server behind.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;

use crate::cli::ServerSettings;
use crate::error::{Error, Result};
use crate::tls::build_server_tls;

/// Resolve the `--host` value and port into a socket address.
pub fn bind_address(host: &str, port: u16) -> Result<SocketAddr> {
    let ip: IpAddr = host
        .parse()
        .map_err(|e| Error::Usage(format!("invalid bind address {host:?}: {e}")))?;
    Ok(SocketAddr::new(ip, port))
}

/// Start the HTTP/HTTPS server described by `settings`.
///
/// This function blocks until the server shuts down through `handle`.
pub async fn start_server(app: Router, settings: &ServerSettings, handle: Handle) -> Result<()> {
    let addr = bind_address(&settings.host, settings.port)?;
    let mode = settings.trust.mode_name();

    match build_server_tls(&settings.trust)? {
        None => start_plain_server(app, addr, handle).await,
        Some(config) => {
            tracing::info!(%addr, mode, "Starting HTTPS server");
            let rustls_config = RustlsConfig::from_config(Arc::new(config));
            axum_server::bind_rustls(addr, rustls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .map_err(|e| Error::transport(&e))
        }
    }
}

/// Start a plain HTTP server (no TLS).
async fn start_plain_server(app: Router, addr: SocketAddr, handle: Handle) -> Result<()> {
    tracing::info!(%addr, "Starting HTTP server (no TLS)");

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|e| Error::transport(&e))
}
