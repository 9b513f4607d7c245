//! Constants shared by the server and client.
//!
//! Runtime configuration comes from the command line (see [`crate::cli`]) and
//! `RUST_LOG`; everything fixed by the wire contract or by the defaults of the
//! two binaries lives here.

// =============================================================================
// Wire Contract
// =============================================================================

/// Body returned by the server for every request
pub const GREETING: &str = "Hello Buddy!\n";

/// Path requested by the client, appended to the endpoint
pub const HELLO_PATH: &str = "/hello";

/// Status line the client requires
pub const EXPECTED_STATUS: &str = "200 OK";

/// Content type of the greeting
pub const GREETING_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default bind address; the port always comes from the command line
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";

/// How long in-flight connections may drain after SIGINT/SIGTERM
pub const SHUTDOWN_GRACE_SECS: u64 = 10;

/// ALPN protocols offered by the TLS listener
pub const SERVER_ALPN_PROTOCOLS: [&[u8]; 2] = [b"h2", b"http/1.1"];

// =============================================================================
// Logging
// =============================================================================

/// Default log filter when neither `--log-level` nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = "hello_tls=info,hello_server=info,hello_client=info";

// =============================================================================
// Usage
// =============================================================================

/// Exit status for usage errors and fatal runtime errors alike
pub const FAILURE_EXIT_CODE: u8 = 2;

pub const SERVER_USAGE: &str = "\
HTTP server with 3 modes: No Authentication, HTTPS server-side only, HTTPS mutual with CA root cert
no authentication usage: hello-server  <port>
https server-side usage: hello-server  <port> <key.pem> <cert.pem>
https mutual usage     : hello-server  <port> <key.pem> <cert.pem> <cacert.pem>";

pub const CLIENT_USAGE: &str = "\
HTTP client with 3 modes: No Authentication, HTTPS server-side only, HTTPS mutual
no authentication usage: hello-client  <endpoint>
https server-side usage: hello-client  <endpoint> <ca.pem>
https mutual usage     : hello-client  <endpoint> <ca.pem> <cert.pem> <key.pem>";
