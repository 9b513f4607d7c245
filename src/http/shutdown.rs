//! Graceful shutdown on SIGTERM/SIGINT.

use std::time::Duration;

use axum_server::Handle;

use crate::config::SHUTDOWN_GRACE_SECS;

/// Setup graceful shutdown on SIGTERM and SIGINT.
///
/// When either signal is received the server stops accepting new connections
/// and waits up to [`SHUTDOWN_GRACE_SECS`] for existing ones to finish.
///
/// On unix the signal handlers are registered before this returns, so a
/// signal arriving once the listener is bound always triggers shutdown.
#[cfg(unix)]
pub fn setup_shutdown_handler(handle: Handle) {
    use tokio::signal::unix::{signal, SignalKind};

    let (mut interrupt, mut terminate) =
        match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
            (Ok(interrupt), Ok(terminate)) => (interrupt, terminate),
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!(error = %e, "Failed to install signal handlers");
                return;
            }
        };

    tokio::spawn(async move {
        tokio::select! {
            _ = interrupt.recv() => {
                tracing::info!("Received SIGINT, initiating graceful shutdown");
            }
            _ = terminate.recv() => {
                tracing::info!("Received SIGTERM, initiating graceful shutdown");
            }
        }

        graceful_shutdown(&handle);
    });
}

#[cfg(not(unix))]
pub fn setup_shutdown_handler(handle: Handle) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            return;
        }
        tracing::info!("Received Ctrl+C, initiating graceful shutdown");

        graceful_shutdown(&handle);
    });
}

fn graceful_shutdown(handle: &Handle) {
    handle.graceful_shutdown(Some(Duration::from_secs(SHUTDOWN_GRACE_SECS)));
    tracing::info!(
        grace_secs = SHUTDOWN_GRACE_SECS,
        "Graceful shutdown initiated, waiting for connections to close"
    );
}
