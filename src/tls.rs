//! Trust configuration selection.
//!
//! Maps the three authentication modes onto rustls configurations:
//! - **None**: no TLS at all
//! - **ServerAuth**: the server presents a certificate, the client checks it
//!   against a single CA
//! - **MutualAuth**: both peers present certificates and both verify the other
//!   against a CA
//!
//! All certificate and key material is read from disk once, while building
//! the configuration. Any read or parse failure is an [`Error::Config`].

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustls::crypto::CryptoProvider;
use rustls::server::WebPkiClientVerifier;
use rustls::{ClientConfig, RootCertStore, ServerConfig};
use rustls_pki_types::{CertificateDer, PrivateKeyDer};

use crate::config::SERVER_ALPN_PROTOCOLS;
use crate::error::{Error, Result};

/// How the client verifies the server, and whether it identifies itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientTrust {
    /// Plain HTTP, or HTTPS with the library's default roots
    None,
    /// Verify the server against `ca_cert` only
    ServerAuth { ca_cert: PathBuf },
    /// Verify the server against `ca_cert` and present `cert`/`key`
    MutualAuth {
        ca_cert: PathBuf,
        cert: PathBuf,
        key: PathBuf,
    },
}

/// What the server presents, and whether it demands a client certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerTrust {
    /// Plain HTTP
    None,
    /// Present `cert`/`key`, accept any client
    ServerAuth { key: PathBuf, cert: PathBuf },
    /// Present `cert`/`key`, require a client certificate issued by `ca_cert`
    MutualAuth {
        key: PathBuf,
        cert: PathBuf,
        ca_cert: PathBuf,
    },
}

impl ClientTrust {
    pub fn mode_name(&self) -> &'static str {
        match self {
            ClientTrust::None => "none",
            ClientTrust::ServerAuth { .. } => "server-auth",
            ClientTrust::MutualAuth { .. } => "mutual",
        }
    }
}

impl ServerTrust {
    pub fn mode_name(&self) -> &'static str {
        match self {
            ServerTrust::None => "none",
            ServerTrust::ServerAuth { .. } => "server-auth",
            ServerTrust::MutualAuth { .. } => "mutual",
        }
    }
}

/// The crypto provider used for every config built here.
///
/// Passed explicitly so nothing depends on which provider happens to be
/// installed as the process default.
fn crypto_provider() -> Arc<CryptoProvider> {
    Arc::new(rustls::crypto::aws_lc_rs::default_provider())
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| Error::config(path, e))
}

/// Load every PEM certificate in `path`.
///
/// A file without a single certificate is an error.
pub fn load_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>> {
    let mut reader = open(path)?;
    let certs = rustls_pemfile::certs(&mut reader)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::config(path, e))?;

    if certs.is_empty() {
        return Err(Error::config(path, "no PEM certificates found"));
    }

    Ok(certs)
}

/// Load the first PEM private key (PKCS#1, PKCS#8 or SEC1) in `path`.
pub fn load_private_key(path: &Path) -> Result<PrivateKeyDer<'static>> {
    let mut reader = open(path)?;
    rustls_pemfile::private_key(&mut reader)
        .map_err(|e| Error::config(path, e))?
        .ok_or_else(|| Error::config(path, "no PEM private key found"))
}

/// Build a trust root holding only the CA certificates in `path`.
pub fn load_root_store(path: &Path) -> Result<RootCertStore> {
    let mut roots = RootCertStore::empty();
    for cert in load_certs(path)? {
        roots
            .add(cert)
            .map_err(|e| Error::config(path, format!("invalid CA certificate: {e}")))?;
    }
    Ok(roots)
}

/// Build the rustls client configuration for a TLS trust mode.
///
/// Returns `None` for [`ClientTrust::None`]: the client then keeps the HTTP
/// library's own defaults.
pub fn build_client_tls(trust: &ClientTrust) -> Result<Option<ClientConfig>> {
    let (ca_cert, identity) = match trust {
        ClientTrust::None => return Ok(None),
        ClientTrust::ServerAuth { ca_cert } => (ca_cert, None),
        ClientTrust::MutualAuth { ca_cert, cert, key } => (ca_cert, Some((cert, key))),
    };

    let roots = load_root_store(ca_cert)?;

    let builder = ClientConfig::builder_with_provider(crypto_provider())
        .with_safe_default_protocol_versions()
        .map_err(|e| Error::config(ca_cert, format!("TLS version config: {e}")))?
        .with_root_certificates(roots);

    let config = match identity {
        None => builder.with_no_client_auth(),
        Some((cert, key)) => {
            let chain = load_certs(cert)?;
            let private_key = load_private_key(key)?;
            builder
                .with_client_auth_cert(chain, private_key)
                .map_err(|e| Error::config(key, format!("client certificate/key: {e}")))?
        }
    };

    Ok(Some(config))
}

/// Build the rustls server configuration for a TLS trust mode.
///
/// Returns `None` for [`ServerTrust::None`], meaning a plaintext listener.
/// In mutual mode a client without a certificate chaining to the CA fails
/// the handshake; no request from it reaches the router.
pub fn build_server_tls(trust: &ServerTrust) -> Result<Option<ServerConfig>> {
    let (key, cert, client_ca) = match trust {
        ServerTrust::None => return Ok(None),
        ServerTrust::ServerAuth { key, cert } => (key, cert, None),
        ServerTrust::MutualAuth { key, cert, ca_cert } => (key, cert, Some(ca_cert)),
    };

    let provider = crypto_provider();
    let chain = load_certs(cert)?;
    let private_key = load_private_key(key)?;

    let builder = ServerConfig::builder_with_provider(Arc::clone(&provider))
        .with_safe_default_protocol_versions()
        .map_err(|e| Error::config(cert, format!("TLS version config: {e}")))?;

    let builder = match client_ca {
        None => builder.with_no_client_auth(),
        Some(ca_cert) => {
            let roots = load_root_store(ca_cert)?;
            let verifier = WebPkiClientVerifier::builder_with_provider(Arc::new(roots), provider)
                .build()
                .map_err(|e| Error::config(ca_cert, format!("client verifier: {e}")))?;
            builder.with_client_cert_verifier(verifier)
        }
    };

    let mut config = builder
        .with_single_cert(chain, private_key)
        .map_err(|e| Error::config(key, format!("server certificate/key: {e}")))?;
    config.alpn_protocols = SERVER_ALPN_PROTOCOLS.iter().map(|p| p.to_vec()).collect();

    Ok(Some(config))
}
