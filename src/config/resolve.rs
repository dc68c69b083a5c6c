//! Cross-option validation and final configuration assembly.

use thiserror::Error;

use crate::cli::{buckets, Cli};
use crate::config::schema::{ServerConfig, TlsMaterial};

/// Errors produced while resolving the command line into a
/// [`ServerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("data directory -d is required")]
    MissingDirectory,

    #[error("--key and --cert must be given together")]
    IncompleteKeyPair,

    #[error("--tls-port requires both --key and --cert")]
    TlsPortWithoutKeyPair,

    #[error("--configure-bucket requires a bucket name")]
    MissingBucketName,

    #[error("cannot read bucket config {path}: {source}")]
    BucketConfigRead {
        path: String,
        source: std::io::Error,
    },
}

/// Resolve parsed options plus the raw argument vector into an immutable
/// [`ServerConfig`].
///
/// The raw vector is re-scanned for `--configure-bucket` groups, whose
/// arity the option schema cannot express. Resolution is deterministic:
/// the same vector (over the same files) yields the same config.
pub fn resolve(cli: Cli, raw_args: &[String]) -> Result<ServerConfig, ConfigError> {
    let buckets = buckets::extract(raw_args)?;

    let directory = cli.directory.ok_or(ConfigError::MissingDirectory)?;

    let material = match (cli.key, cli.cert) {
        (Some(key), Some(cert)) => Some(TlsMaterial {
            key: key.0,
            cert: cert.0,
        }),
        (None, None) => None,
        _ => return Err(ConfigError::IncompleteKeyPair),
    };

    if cli.tls_port.is_some() && material.is_none() {
        return Err(ConfigError::TlsPortWithoutKeyPair);
    }

    // A dedicated TLS port claims the key/cert material: the secondary
    // listener presents it and the primary stays plain. Without one, the
    // material attaches directly to the primary (single TLS-only server).
    let (tls, auxiliary_tls) = if cli.tls_port.is_some() {
        (None, material)
    } else {
        (material, None)
    };

    Ok(ServerConfig {
        directory,
        address: cli.address,
        port: cli.port,
        tls_port: cli.tls_port,
        silent: cli.silent,
        tls,
        auxiliary_tls,
        service_endpoint: cli.service_endpoint,
        allow_mismatched_signatures: cli.allow_mismatched_signatures,
        buckets,
    })
}
