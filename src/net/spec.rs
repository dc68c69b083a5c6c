//! Listen plan derivation.
//!
//! Both specs are computed up front from the resolved config and handed
//! to independent start calls. Nothing about a running listener is
//! patched to start the second one.

use crate::config::{ServerConfig, TlsMaterial};

/// Everything needed to bind and serve one listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenSpec {
    /// Hostname or IP to bind.
    pub address: String,

    /// Requested port; `0` asks the OS for an ephemeral one.
    pub port: u16,

    /// Key/cert to present when this listener terminates TLS.
    pub tls: Option<TlsMaterial>,
}

impl ListenSpec {
    /// The always-started listener: primary port, carrying TLS material
    /// only in the single TLS-only server case.
    pub fn primary(config: &ServerConfig) -> Self {
        Self {
            address: config.address.clone(),
            port: config.port,
            tls: config.tls.clone(),
        }
    }

    /// The dedicated TLS listener, present exactly when a TLS port and
    /// auxiliary key/cert material are both configured.
    pub fn secondary(config: &ServerConfig) -> Option<Self> {
        let port = config.tls_port?;
        let tls = config.auxiliary_tls.clone()?;
        Some(Self {
            address: config.address.clone(),
            port,
            tls: Some(tls),
        })
    }
}
