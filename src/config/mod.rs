//! Configuration resolution subsystem.
//!
//! # Data Flow
//! ```text
//! argv
//!     → cli (schema-driven parse, converters run per token)
//!     → cli::buckets (raw-token scan for --configure-bucket groups)
//!     → resolve.rs (cross-option validation, key/cert relocation)
//!     → ServerConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once resolved; the listener layer derives its
//!   plan from it without mutation
//! - Validation separates syntactic (clap) from semantic checks
//! - Options are never partially applied: any failure aborts resolution

pub mod resolve;
pub mod schema;

pub use resolve::{resolve, ConfigError};
pub use schema::{BucketConfig, ServerConfig, TlsMaterial};
