//! Test certificate authority and in-process server helpers.

#![allow(dead_code)]

use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum_server::Handle;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use rcgen::{BasicConstraints, Certificate, CertificateParams, DnType, IsCa, KeyPair};
use tempfile::TempDir;

use hello_tls::cli::ServerSettings;
use hello_tls::http::start_server;
use hello_tls::routes::create_router;
use hello_tls::tls::ServerTrust;

/// Certificates written to a temporary directory.
///
/// - `ca.pem`: the trusted CA
/// - `server.pem`/`server.key`, `client.pem`/`client.key`: issued by `ca.pem`
/// - `rogue-ca.pem`: an unrelated CA
/// - `rogue-server.*`, `rogue-client.*`: issued by `rogue-ca.pem`
pub struct Pki {
    dir: TempDir,
}

struct Authority {
    cert: Certificate,
    key: KeyPair,
}

impl Pki {
    pub fn generate() -> Self {
        let pki = Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        };

        let ca = pki.authority("ca", "hello-tls test CA");
        let rogue = pki.authority("rogue-ca", "untrusted test CA");

        pki.leaf("server", &ca);
        pki.leaf("client", &ca);
        pki.leaf("rogue-server", &rogue);
        pki.leaf("rogue-client", &rogue);

        fs::write(pki.path("broken.pem"), "-----BEGIN CERTIFICATE-----\nnot base64\n")
            .expect("write broken.pem");

        pki
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn authority(&self, name: &str, common_name: &str) -> Authority {
        let key = KeyPair::generate().expect("generate CA key");
        let mut params = CertificateParams::new(Vec::<String>::new()).expect("CA params");
        params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
        params
            .distinguished_name
            .push(DnType::CommonName, common_name);
        let cert = params.self_signed(&key).expect("self-sign CA");

        fs::write(self.path(&format!("{name}.pem")), cert.pem()).expect("write CA cert");
        Authority { cert, key }
    }

    fn leaf(&self, name: &str, issuer: &Authority) {
        let key = KeyPair::generate().expect("generate leaf key");
        let mut params =
            CertificateParams::new(vec!["localhost".to_string(), "127.0.0.1".to_string()])
                .expect("leaf params");
        params.distinguished_name.push(DnType::CommonName, name);
        let cert = params
            .signed_by(&key, &issuer.cert, &issuer.key)
            .expect("sign leaf");

        fs::write(self.path(&format!("{name}.pem")), cert.pem()).expect("write leaf cert");
        fs::write(self.path(&format!("{name}.key")), key.serialize_pem()).expect("write leaf key");
    }

    pub fn server_auth(&self, cert: &str) -> ServerTrust {
        ServerTrust::ServerAuth {
            key: self.path(&format!("{cert}.key")),
            cert: self.path(&format!("{cert}.pem")),
        }
    }

    pub fn server_mutual(&self, cert: &str, ca: &str) -> ServerTrust {
        ServerTrust::MutualAuth {
            key: self.path(&format!("{cert}.key")),
            cert: self.path(&format!("{cert}.pem")),
            ca_cert: self.path(&format!("{ca}.pem")),
        }
    }
}

/// A greeting server running on an ephemeral loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    handle: Handle,
}

impl TestServer {
    pub async fn start(trust: ServerTrust) -> Self {
        let handle = Handle::new();
        let settings = ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
            trust,
        };

        let app = create_router(settings.trust.mode_name());
        let server_handle = handle.clone();
        tokio::spawn(async move {
            if let Err(e) = start_server(app, &settings, server_handle).await {
                eprintln!("[test] server failed: {e}");
            }
        });

        let addr = handle.listening().await.expect("server did not start");
        Self { addr, handle }
    }

    pub fn http_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.addr.port())
    }

    pub fn https_url(&self) -> String {
        format!("https://127.0.0.1:{}", self.addr.port())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.shutdown();
    }
}

/// A plain TCP listener answering every connection with a hand-written
/// HTTP/1.1 response, for status lines and bodies axum would never send.
pub struct RawServer {
    pub addr: SocketAddr,
}

impl RawServer {
    pub async fn start(status_line: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind raw server");
        let addr = listener.local_addr().expect("raw server address");

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let response = response.clone();
                tokio::spawn(async move {
                    // Read until the end of the request head.
                    let mut request = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match stream.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => request.extend_from_slice(&buf[..n]),
                        }
                    }
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self { addr }
    }

    pub fn http_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.addr.port())
    }
}
