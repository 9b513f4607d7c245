//! Tracing subscriber setup shared by both binaries.
//!
//! Logs always go to stderr so the client's stdout carries only the status
//! line it prints.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::DEFAULT_LOG_FILTER;

/// Log output format, selected with `--log-format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct LogOptions {
    pub level: Option<String>,
    pub format: LogFormat,
}

impl LogOptions {
    pub fn new(level: Option<String>, format: LogFormat) -> Self {
        Self { level, format }
    }

    /// Filter priority: CLI > env > default
    pub fn filter(&self) -> String {
        self.level
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
    }
}

pub fn init(options: &LogOptions) {
    let filter = EnvFilter::new(options.filter());

    match options.format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
