//! Listener startup sequencing.
//!
//! # Responsibilities
//! - Bind the primary socket and begin serving the shared service router
//! - Report the bound address/port for each successful bind
//! - Bind the optional dedicated TLS socket, but only after the primary
//!   bind has completed
//! - Surface failures with the right severity: primary fatal, secondary
//!   warning

use std::net::TcpListener as StdTcpListener;

use axum::Router;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::config::ServerConfig;
use crate::net::spec::ListenSpec;
use crate::net::tls;
use crate::service::Service;

/// Errors raised while starting a listener.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The socket could not be bound.
    #[error("failed to bind {address}:{port}: {source}")]
    Bind {
        address: String,
        port: u16,
        source: std::io::Error,
    },

    /// Key/cert material was rejected.
    #[error("invalid TLS key or certificate: {0}")]
    Tls(String),

    /// The primary serve loop ended unexpectedly.
    #[error("listener terminated: {0}")]
    Serve(std::io::Error),
}

/// Address and port actually bound, reported once per listener.
///
/// The port is the OS-assigned one when `0` was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenResult {
    pub address: String,
    pub port: u16,
}

/// Handle to the started listeners.
#[derive(Debug)]
pub struct RunningServer {
    /// Primary listener bind result.
    pub primary: ListenResult,

    /// Dedicated TLS listener bind result, when one started.
    pub secondary: Option<ListenResult>,

    primary_task: JoinHandle<std::io::Result<()>>,
}

impl RunningServer {
    /// Park until the primary listener stops serving.
    pub async fn wait(self) -> Result<(), ListenerError> {
        match self.primary_task.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(ListenerError::Serve(err)),
            Err(err) => Err(ListenerError::Serve(std::io::Error::other(err))),
        }
    }
}

/// Start every listener the config calls for, sharing one service router.
///
/// The primary bind completes before the secondary is attempted, never
/// concurrently. A secondary failure is logged as a warning and the
/// primary keeps serving; a primary failure aborts startup. Nothing is
/// retried.
pub async fn start<S: Service>(
    config: &ServerConfig,
    service: &S,
) -> Result<RunningServer, ListenerError> {
    let router = service.router();

    let primary_spec = ListenSpec::primary(config);
    let (primary, primary_task) = bind_and_serve(&primary_spec, router.clone()).await?;

    let mut secondary = None;
    if let Some(spec) = ListenSpec::secondary(config) {
        match bind_and_serve(&spec, router).await {
            Ok((result, task)) => {
                // Runs until process exit; a later failure only warns.
                tokio::spawn(async move {
                    if let Ok(Err(err)) = task.await {
                        tracing::warn!(error = %err, "TLS listener terminated");
                    }
                });
                secondary = Some(result);
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    port = spec.port,
                    "TLS listener failed to start; primary listener continues"
                );
            }
        }
    }

    Ok(RunningServer {
        primary,
        secondary,
        primary_task,
    })
}

/// Bind one socket and spawn its serve loop.
///
/// The TCP bind happens before TLS material is loaded so that an occupied
/// port surfaces as a bind error, not a TLS one.
async fn bind_and_serve(
    spec: &ListenSpec,
    router: Router,
) -> Result<(ListenResult, JoinHandle<std::io::Result<()>>), ListenerError> {
    let bind_error = |source| ListenerError::Bind {
        address: spec.address.clone(),
        port: spec.port,
        source,
    };

    let std_listener =
        StdTcpListener::bind((spec.address.as_str(), spec.port)).map_err(bind_error)?;
    std_listener.set_nonblocking(true).map_err(bind_error)?;
    let local = std_listener.local_addr().map_err(bind_error)?;

    let task = match &spec.tls {
        Some(material) => {
            let rustls = tls::rustls_config(material).await?;
            tokio::spawn(async move {
                axum_server::from_tcp_rustls(std_listener, rustls)
                    .serve(router.into_make_service())
                    .await
            })
        }
        None => {
            let listener = tokio::net::TcpListener::from_std(std_listener).map_err(bind_error)?;
            tokio::spawn(async move { axum::serve(listener, router).await })
        }
    };

    tracing::info!(address = %local, tls = spec.tls.is_some(), "listener bound");

    Ok((
        ListenResult {
            address: local.ip().to_string(),
            port: local.port(),
        },
        task,
    ))
}
