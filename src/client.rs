//! The requesting side: one GET to `<endpoint>/hello`, then validation.
//!
//! No timeout is configured on the transport. A server that accepts the
//! connection and never answers keeps the client waiting.

use http::StatusCode;
use hyper::ext::ReasonPhrase;

use crate::cli::ClientSettings;
use crate::config::{EXPECTED_STATUS, GREETING, HELLO_PATH};
use crate::error::{Error, Result};
use crate::tls::{build_client_tls, ClientTrust};

/// What the server sent back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    /// Status line, e.g. `200 OK`
    pub status: String,
    pub body: String,
}

impl Greeting {
    /// Check the status line and body against the wire contract.
    pub fn validate(&self) -> Result<()> {
        if self.status != EXPECTED_STATUS || self.body != GREETING {
            return Err(Error::Validation {
                status: self.status.clone(),
                body: self.body.clone(),
            });
        }
        Ok(())
    }
}

/// Build the HTTP client enforcing `trust`.
///
/// In the TLS modes the client trusts only the given CA. Certificate and key
/// files are read here, before any connection is attempted.
pub fn build_client_transport(trust: &ClientTrust) -> Result<reqwest::Client> {
    let builder = match build_client_tls(trust)? {
        None => reqwest::Client::builder(),
        Some(tls) => reqwest::Client::builder().use_preconfigured_tls(tls),
    };
    builder.build().map_err(|e| Error::transport(&e))
}

/// `<endpoint>/hello`, without doubling a trailing slash.
pub fn hello_url(endpoint: &str) -> String {
    format!("{}{HELLO_PATH}", endpoint.trim_end_matches('/'))
}

/// Render a status as `<code> <reason>`, the form the contract compares.
///
/// hyper only records the reason phrase from the wire when it differs from
/// the canonical one, so `wire_reason` wins whenever it is present.
pub fn status_line(status: StatusCode, wire_reason: Option<&ReasonPhrase>) -> String {
    match wire_reason {
        Some(reason) => format!(
            "{} {}",
            status.as_u16(),
            String::from_utf8_lossy(reason.as_bytes())
        ),
        None => match status.canonical_reason() {
            Some(reason) => format!("{} {reason}", status.as_u16()),
            None => status.as_u16().to_string(),
        },
    }
}

/// Send the GET and collect the status line and body.
pub async fn fetch_hello(client: &reqwest::Client, endpoint: &str) -> Result<Greeting> {
    let url = hello_url(endpoint);
    tracing::debug!(%url, "Sending request");

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| Error::transport(&e))?;

    let status = status_line(
        response.status(),
        response.extensions().get::<ReasonPhrase>(),
    );
    let body = response.text().await.map_err(|e| Error::transport(&e))?;

    tracing::debug!(%status, body_len = body.len(), "Received response");
    Ok(Greeting { status, body })
}

/// Build the transport for `settings` and perform the single request.
///
/// The response is returned unvalidated so the caller can report the status
/// line before checking it.
pub async fn run(settings: &ClientSettings) -> Result<Greeting> {
    let client = build_client_transport(&settings.trust)?;
    tracing::info!(
        endpoint = %settings.endpoint,
        mode = settings.trust.mode_name(),
        "Requesting greeting"
    );
    fetch_hello(&client, &settings.endpoint).await
}
