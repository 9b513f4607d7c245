//! hello-tls: one greeting, three ways to trust the peer.
//!
//! A server answering every request with `Hello Buddy!\n` and a client that
//! fetches `/hello` once, each running with no authentication, server-side
//! TLS, or mutual TLS depending on how many positional arguments they get.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod tls;

pub use error::{Error, Result};
