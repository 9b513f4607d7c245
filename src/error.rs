use std::path::{Path, PathBuf};

/// Every way the server or client can fail.
///
/// None of these are recovered from: the binaries report the error once and
/// exit with [`crate::config::FAILURE_EXIT_CODE`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Usage(String),

    #[error("failed to load {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response {status}: {body:?}")]
    Validation { status: String, body: String },
}

impl Error {
    pub fn config(path: &Path, reason: impl ToString) -> Self {
        Error::Config {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Wrap a transport failure, keeping the whole source chain in the message.
    ///
    /// reqwest and hyper put the interesting part (refused connection, bad
    /// certificate) several levels down.
    pub fn transport(err: &(dyn std::error::Error + 'static)) -> Self {
        Error::Transport(error_chain(err))
    }
}

/// Render an error and all of its sources as `outer: inner: innermost`.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.ends_with(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Debug, thiserror::Error)]
    #[error("request failed")]
    struct Outer(#[source] io::Error);

    #[test]
    fn error_chain_includes_sources() {
        let err = Outer(io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"));
        assert_eq!(error_chain(&err), "request failed: connection refused");
    }

    #[test]
    fn error_chain_skips_repeated_messages() {
        #[derive(Debug, thiserror::Error)]
        #[error("tls: {0}")]
        struct Repeats(#[source] io::Error);

        let err = Repeats(io::Error::new(io::ErrorKind::Other, "bad cert"));
        assert_eq!(error_chain(&err), "tls: bad cert");
    }

    #[test]
    fn config_error_names_the_file() {
        let err = Error::config(Path::new("/tmp/ca.pem"), "no certificates found");
        assert_eq!(
            err.to_string(),
            "failed to load /tmp/ca.pem: no certificates found"
        );
    }

    #[test]
    fn validation_error_quotes_the_body() {
        let err = Error::Validation {
            status: "404 Not Found".to_string(),
            body: "nope\n".to_string(),
        };
        assert_eq!(err.to_string(), r#"unexpected response 404 Not Found: "nope\n""#);
    }
}
