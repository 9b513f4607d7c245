//! Command line parsing for both binaries.
//!
//! Options (`--log-level`, `--log-format`, `--host`) are parsed by clap. The
//! positional arguments are mapped onto a trust mode by their count, as
//! tabulated in each binary's usage text.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{CLIENT_USAGE, DEFAULT_BIND_HOST, SERVER_USAGE};
use crate::error::{Error, Result};
use crate::logging::{LogFormat, LogOptions};
use crate::tls::{ClientTrust, ServerTrust};

/// Greeting server with no auth, server-side TLS or mutual TLS
#[derive(Parser, Debug)]
#[command(name = "hello-server", version, about, after_help = SERVER_USAGE)]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, default_value = DEFAULT_BIND_HOST)]
    pub host: String,

    /// Log level filter (e.g., "hello_tls=debug")
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::default())]
    pub log_format: LogFormat,

    /// <port> [<key.pem> <cert.pem> [<cacert.pem>]]
    #[arg(value_name = "ARGS", num_args = 0..)]
    pub positional: Vec<String>,
}

/// Greeting client with no auth, server-side TLS or mutual TLS
#[derive(Parser, Debug)]
#[command(name = "hello-client", version, about, after_help = CLIENT_USAGE)]
pub struct ClientArgs {
    /// Log level filter (e.g., "hello_tls=debug")
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::default())]
    pub log_format: LogFormat,

    /// <endpoint> [<ca.pem> [<cert.pem> <key.pem>]]
    #[arg(value_name = "ARGS", num_args = 0..)]
    pub positional: Vec<String>,
}

/// Everything the server needs once its arguments are understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub trust: ServerTrust,
}

/// Everything the client needs once its arguments are understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub endpoint: String,
    pub trust: ClientTrust,
}

impl ServerArgs {
    pub fn log_options(&self) -> LogOptions {
        LogOptions::new(self.log_level.clone(), self.log_format)
    }

    pub fn settings(&self) -> Result<ServerSettings> {
        let (port, trust) = server_mode(&self.positional)?;
        Ok(ServerSettings {
            host: self.host.clone(),
            port,
            trust,
        })
    }
}

impl ClientArgs {
    pub fn log_options(&self) -> LogOptions {
        LogOptions::new(self.log_level.clone(), self.log_format)
    }

    pub fn settings(&self) -> Result<ClientSettings> {
        let (endpoint, trust) = client_mode(&self.positional)?;
        Ok(ClientSettings { endpoint, trust })
    }
}

/// Map `port [key cert [ca]]` onto a port and server trust mode.
pub fn server_mode(args: &[String]) -> Result<(u16, ServerTrust)> {
    let trust = match args {
        [_] => ServerTrust::None,
        [_, key, cert] => ServerTrust::ServerAuth {
            key: PathBuf::from(key),
            cert: PathBuf::from(cert),
        },
        [_, key, cert, ca_cert] => ServerTrust::MutualAuth {
            key: PathBuf::from(key),
            cert: PathBuf::from(cert),
            ca_cert: PathBuf::from(ca_cert),
        },
        _ => return Err(Error::Usage(SERVER_USAGE.to_string())),
    };

    let port = args[0]
        .parse::<u16>()
        .map_err(|_| Error::Usage(format!("invalid port {:?}\n{SERVER_USAGE}", args[0])))?;

    Ok((port, trust))
}

/// Map `endpoint [ca [cert key]]` onto an endpoint and client trust mode.
pub fn client_mode(args: &[String]) -> Result<(String, ClientTrust)> {
    let trust = match args {
        [_] => ClientTrust::None,
        [_, ca_cert] => ClientTrust::ServerAuth {
            ca_cert: PathBuf::from(ca_cert),
        },
        [_, ca_cert, cert, key] => ClientTrust::MutualAuth {
            ca_cert: PathBuf::from(ca_cert),
            cert: PathBuf::from(cert),
            key: PathBuf::from(key),
        },
        _ => return Err(Error::Usage(CLIENT_USAGE.to_string())),
    };

    Ok((args[0].clone(), trust))
}
