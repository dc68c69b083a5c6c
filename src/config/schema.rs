//! Resolved configuration types.
//!
//! Everything here is produced once by the resolver and immutable
//! afterwards. Listener startup derives its listen plan from these values
//! without modifying them.

use std::path::PathBuf;

/// Resolved server configuration.
///
/// Invariants upheld by the resolver:
/// - `directory` is always present (its absence is a fatal error, not a
///   default).
/// - `tls` and `auxiliary_tls` are never both set: when a dedicated TLS
///   port exists, key/cert material lives in `auxiliary_tls` and the
///   primary listener stays plain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Data directory. Created by the option converter if missing.
    pub directory: PathBuf,

    /// Hostname or IP to bind to.
    pub address: String,

    /// Primary listener port. `0` requests an ephemeral port.
    pub port: u16,

    /// Optional dedicated port for the TLS listener.
    pub tls_port: Option<u16>,

    /// Suppress log output.
    pub silent: bool,

    /// Key/cert presented by the primary listener (single TLS-only
    /// server). Absent whenever `tls_port` is set.
    pub tls: Option<TlsMaterial>,

    /// Key/cert presented by the dedicated TLS listener.
    pub auxiliary_tls: Option<TlsMaterial>,

    /// Overrides the S3 service endpoint advertised by the engine.
    pub service_endpoint: Option<String>,

    /// Accept any well-formed request signature.
    pub allow_mismatched_signatures: bool,

    /// Buckets to register at startup, in invocation order.
    pub buckets: Vec<BucketConfig>,
}

/// A private key and certificate pair, as raw PEM bytes.
///
/// The two are only ever carried together; a lone key or certificate is
/// rejected during resolution.
#[derive(Clone, PartialEq, Eq)]
pub struct TlsMaterial {
    /// PEM-encoded private key.
    pub key: Vec<u8>,

    /// PEM-encoded certificate chain.
    pub cert: Vec<u8>,
}

impl std::fmt::Debug for TlsMaterial {
    // Key bytes stay out of logs and error output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsMaterial")
            .field("key", &format_args!("<{} bytes>", self.key.len()))
            .field("cert", &format_args!("<{} bytes>", self.cert.len()))
            .finish()
    }
}

/// A bucket to create and configure at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketConfig {
    /// Bucket name.
    pub name: String,

    /// Raw contents of each configuration file, in the order given on the
    /// command line. Opaque to this layer; the engine interprets them.
    pub configs: Vec<Vec<u8>>,
}
