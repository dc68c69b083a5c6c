//! Network listener subsystem.
//!
//! # Data Flow
//! ```text
//! ServerConfig
//!     → spec.rs (primary + optional secondary listen plan, computed up front)
//!     → tls.rs (key/cert material → rustls server config)
//!     → listener.rs (bind in order, serve the shared router, report results)
//! ```
//!
//! # Design Decisions
//! - Both listen specs are derived before anything binds; starting the
//!   second listener never mutates the first
//! - Primary bind failure is fatal; secondary failure is a warning and
//!   the primary keeps serving
//! - No bind is ever retried

pub mod listener;
pub mod spec;
pub mod tls;

pub use listener::{start, ListenResult, ListenerError, RunningServer};
pub use spec::ListenSpec;
