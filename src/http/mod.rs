//! HTTP server module with TLS support.
//!
//! This module provides the greeting listener in three modes:
//! - **None**: Plain HTTP
//! - **ServerAuth**: HTTPS presenting a certificate, no client verification
//! - **MutualAuth**: HTTPS that also requires a client certificate from a CA
//!
//! The server includes graceful shutdown on SIGTERM/SIGINT.

mod server;
pub mod shutdown;

pub use server::{bind_address, start_server};
