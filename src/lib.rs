//! Lightweight S3-compatible mock storage server.
//!
//! This crate is the bootstrap layer: it resolves command-line arguments
//! and files into a validated, immutable [`config::ServerConfig`], then
//! starts one or two listeners (plain and TLS) for the storage service
//! behind the [`service::Service`] seam.

pub mod cli;
pub mod config;
pub mod net;
pub mod observability;
pub mod service;

pub use cli::Cli;
pub use config::{ConfigError, ServerConfig};
pub use net::{ListenResult, ListenerError, RunningServer};
pub use service::{Service, StorageService};
