//! Runtime configuration loaded from `AB_*` environment variables.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `AB_HTTP_ADDR` | gateway bind address | `0.0.0.0:8090` |
//! | `AB_ADMIN_ADDRESSES` | comma-separated admin wallets | required |
//! | `AB_AUTO_EXECUTE_DELAY` | approval-to-execution delay | `1s` |
//! | `AB_REQUEST_TIMEOUT` | per-request HTTP timeout | `10s` |
//! | `AB_EVENT_BUFFER` | quorum event channel capacity | `256` |
//! | `AB_CORS_ENABLED` | permissive CORS on the API | `true` |

use ab_02_pending_ledger::LedgerConfig;
use ab_03_chain_bridge::DEFAULT_EVENT_CAPACITY;
use ab_04_api_gateway::ApiConfig;
use shared_types::time::duration_serde::parse_duration;
use std::net::SocketAddr;
use thiserror::Error;

/// Errors raised while loading the runtime configuration.
#[derive(Debug, Error)]
pub enum RuntimeConfigError {
    /// `AB_ADMIN_ADDRESSES` is missing or empty.
    #[error("AB_ADMIN_ADDRESSES must list at least one administrator address")]
    MissingAdmins,

    /// A variable holds a value that does not parse.
    #[error("invalid value for {variable}: '{value}' ({reason})")]
    InvalidValue {
        /// The environment variable name.
        variable: &'static str,
        /// The rejected value.
        value: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Complete runtime configuration for the bridge process.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// HTTP gateway settings.
    pub api: ApiConfig,
    /// Ledger settings, including the administrator set.
    pub ledger: LedgerConfig,
    /// Broadcast capacity of the in-memory quorum feed.
    pub event_capacity: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            ledger: LedgerConfig::default(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl BridgeConfig {
    /// Load from the process environment. Fails fast on a missing admin set
    /// or any malformed variable; defaults cover everything else.
    pub fn from_env() -> Result<Self, RuntimeConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using an arbitrary variable source.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, RuntimeConfigError> {
        let mut config = Self::default();

        if let Some(addr) = lookup("AB_HTTP_ADDR") {
            let parsed: SocketAddr =
                addr.parse()
                    .map_err(|e: std::net::AddrParseError| RuntimeConfigError::InvalidValue {
                        variable: "AB_HTTP_ADDR",
                        value: addr.clone(),
                        reason: e.to_string(),
                    })?;
            config.api.host = parsed.ip();
            config.api.port = parsed.port();
        }

        config.ledger.admin_addresses = lookup("AB_ADMIN_ADDRESSES")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if config.ledger.admin_addresses.is_empty() {
            return Err(RuntimeConfigError::MissingAdmins);
        }

        if let Some(delay) = lookup("AB_AUTO_EXECUTE_DELAY") {
            config.ledger.auto_execute_delay =
                parse_duration(&delay).map_err(|reason| RuntimeConfigError::InvalidValue {
                    variable: "AB_AUTO_EXECUTE_DELAY",
                    value: delay.clone(),
                    reason: reason.to_string(),
                })?;
        }

        if let Some(timeout) = lookup("AB_REQUEST_TIMEOUT") {
            config.api.request_timeout =
                parse_duration(&timeout).map_err(|reason| RuntimeConfigError::InvalidValue {
                    variable: "AB_REQUEST_TIMEOUT",
                    value: timeout.clone(),
                    reason: reason.to_string(),
                })?;
        }

        if let Some(buffer) = lookup("AB_EVENT_BUFFER") {
            config.event_capacity =
                buffer
                    .parse()
                    .map_err(|_| RuntimeConfigError::InvalidValue {
                        variable: "AB_EVENT_BUFFER",
                        value: buffer.clone(),
                        reason: "expected a positive integer".to_string(),
                    })?;
        }

        if let Some(cors) = lookup("AB_CORS_ENABLED") {
            config.api.cors_enabled = match cors.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(RuntimeConfigError::InvalidValue {
                        variable: "AB_CORS_ENABLED",
                        value: cors,
                        reason: "expected true or false".to_string(),
                    })
                }
            };
        }

        Ok(config)
    }
}
