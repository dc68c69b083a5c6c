//! Command-line option schema.
//!
//! # Data Flow
//! ```text
//! argv (captured once, read-only)
//!     → Cli (clap parse; converters run per token)
//!     → buckets.rs (raw-token re-scan for --configure-bucket groups)
//!     → config::resolve (cross-option validation)
//! ```
//!
//! # Design Decisions
//! - Converters do their work at parse time: `-d` creates the data
//!   directory, `--key`/`--cert` read the named files into bytes. A
//!   converter failure aborts the whole parse with its own message.
//! - `--configure-bucket` is declared here so `--help` documents it and
//!   unknown flags are still rejected, but its grouping is recovered by
//!   [`buckets`] from the raw token sequence. The schema cannot express
//!   "one name plus a variable-length file list per occurrence".

pub mod buckets;

use std::path::PathBuf;

use clap::Parser;

/// Command-line options.
#[derive(Debug, Parser)]
#[command(
    name = "mocks3",
    version,
    about = "Lightweight S3-compatible mock storage server",
    override_usage = "mocks3 -d <path> [options]",
    disable_version_flag = true,
    after_help = "Examples:\n  \
        $ mocks3 -d /tmp/mocks3 -a 0.0.0.0 -p 0\n  \
        $ mocks3 -d /tmp/mocks3 --configure-bucket test-bucket ./cors.xml ./website.xml"
)]
pub struct Cli {
    /// Data directory
    #[arg(short, long, value_name = "path", value_parser = ensure_directory)]
    pub directory: Option<PathBuf>,

    /// Hostname or IP to bind to
    #[arg(short, long, value_name = "value", default_value = "localhost")]
    pub address: String,

    /// Port of the http server
    #[arg(short, long, value_name = "n", default_value_t = 4578)]
    pub port: u16,

    /// Optional extra port for running TLS
    #[arg(long, value_name = "n")]
    pub tls_port: Option<u16>,

    /// Suppress log messages
    #[arg(short, long)]
    pub silent: bool,

    /// Path to private key file for running with TLS
    #[arg(long, value_name = "path", value_parser = read_file_bytes)]
    pub key: Option<FileBytes>,

    /// Path to certificate file for running with TLS
    #[arg(long, value_name = "path", value_parser = read_file_bytes)]
    pub cert: Option<FileBytes>,

    /// Overrides the AWS S3 service endpoint
    #[arg(long, value_name = "address")]
    pub service_endpoint: Option<String>,

    /// Prevent SignatureDoesNotMatch errors for all well-formed signatures
    #[arg(long)]
    pub allow_mismatched_signatures: bool,

    /// Bucket name and configuration files for creating and configuring a
    /// bucket at startup (repeatable)
    #[arg(long, value_names = ["NAME", "FILE"], num_args = 1.., action = clap::ArgAction::Append)]
    pub configure_bucket: Vec<String>,

    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,
}

/// Raw contents of a file read by an option converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBytes(pub Vec<u8>);

/// Converter for `-d`: the directory is created if missing.
fn ensure_directory(path: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path);
    std::fs::create_dir_all(&path)
        .map_err(|err| format!("cannot create directory {}: {err}", path.display()))?;
    Ok(path)
}

/// Converter for `--key`/`--cert`: the file is read into bytes here so a
/// bad path fails the parse, not the TLS handshake.
fn read_file_bytes(path: &str) -> Result<FileBytes, String> {
    std::fs::read(path)
        .map(FileBytes)
        .map_err(|err| format!("cannot read {path}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(rest: &[&str]) -> Vec<String> {
        std::iter::once("mocks3")
            .chain(rest.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn defaults_match_upstream() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from(args(&["-d", dir.path().to_str().unwrap()]));
        assert_eq!(cli.address, "localhost");
        assert_eq!(cli.port, 4578);
        assert!(!cli.silent);
        assert!(!cli.allow_mismatched_signatures);
        assert!(cli.tls_port.is_none());
    }

    #[test]
    fn directory_converter_creates_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        let cli = Cli::parse_from(args(&["-d", nested.to_str().unwrap()]));
        assert_eq!(cli.directory.as_deref(), Some(nested.as_path()));
        assert!(nested.is_dir());
    }

    #[test]
    fn key_converter_reads_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"key material").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from(args(&[
            "-d",
            dir.path().to_str().unwrap(),
            "--key",
            file.path().to_str().unwrap(),
        ]));
        assert_eq!(cli.key, Some(FileBytes(b"key material".to_vec())));
    }

    #[test]
    fn missing_key_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Cli::try_parse_from(args(&[
            "-d",
            dir.path().to_str().unwrap(),
            "--key",
            "/no/such/file.pem",
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Cli::try_parse_from(args(&["--bogus"])).is_err());
    }
}
