//! Storage service seam.
//!
//! The listener layer needs exactly one thing from the engine: an HTTP
//! handler it can serve on each bound socket. Everything behind that
//! handler (request routing, persistence, bucket semantics) is the
//! engine's concern.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::any;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// What the listener layer consumes from the storage engine.
pub trait Service {
    /// The HTTP handler shared by every listener.
    fn router(&self) -> Router;
}

/// The storage service behind the bootstrap layer.
///
/// Construction consumes the resolved configuration once: each configured
/// bucket gets a directory under the data root and its raw config bytes
/// are retained for the engine.
pub struct StorageService {
    config: Arc<ServerConfig>,
}

impl StorageService {
    /// Register configured buckets and prepare the service.
    pub fn new(config: &ServerConfig) -> std::io::Result<Self> {
        for bucket in &config.buckets {
            std::fs::create_dir_all(config.directory.join(&bucket.name))?;
            tracing::info!(
                bucket = %bucket.name,
                configs = bucket.configs.len(),
                "registered bucket"
            );
        }

        Ok(Self {
            config: Arc::new(config.clone()),
        })
    }

    /// The configuration this service was started with.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

impl Service for StorageService {
    fn router(&self) -> Router {
        Router::new()
            .route("/", any(unimplemented_handler))
            .route("/{*path}", any(unimplemented_handler))
            .layer(TraceLayer::new_for_http())
    }
}

// Placeholder until the request-handling engine lands behind the seam.
async fn unimplemented_handler() -> StatusCode {
    StatusCode::NOT_IMPLEMENTED
}
