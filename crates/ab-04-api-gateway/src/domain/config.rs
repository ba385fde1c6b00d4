//! Gateway configuration with validation.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

/// HTTP API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Bind address.
    pub host: IpAddr,
    /// Port (default: 8090).
    pub port: u16,
    /// Per-request timeout. Every ledger operation is a bounded in-memory
    /// step, so this only guards against stuck connections.
    #[serde(with = "shared_types::time::duration_serde")]
    pub request_timeout: Duration,
    /// Attach a permissive CORS layer, for browser-based admin dashboards.
    pub cors_enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8090,
            request_timeout: Duration::from_secs(10),
            cors_enabled: true,
        }
    }
}

impl ApiConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout.as_millis() == 0 {
            return Err(ConfigError::InvalidTimeout(
                "request_timeout cannot be 0".into(),
            ));
        }
        Ok(())
    }

    /// The socket address the server binds.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Invalid timeout value.
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
}
