//! # Ledger Configuration

use crate::domain::admins::AdminRegistry;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An entry in `admin_addresses` is not a valid address.
    #[error("invalid administrator address '{address}': {reason}")]
    InvalidAdminAddress {
        /// The offending configured string.
        address: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Tunables for the pending-approval ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Wallet addresses allowed to decide transactions.
    ///
    /// An empty set is legal here but leaves every decision unauthorized,
    /// so the runtime refuses to start without at least one entry.
    pub admin_addresses: Vec<String>,

    /// Delay between an approval and its automatic execution.
    ///
    /// The window exists so a mistaken approval can still be observed before
    /// settlement; zero is allowed and executes immediately.
    #[serde(with = "shared_types::time::duration_serde")]
    pub auto_execute_delay: Duration,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            admin_addresses: Vec::new(),
            auto_execute_delay: Duration::from_secs(1),
        }
    }
}

impl LedgerConfig {
    /// Parse the configured administrator addresses into a registry.
    pub fn admin_registry(&self) -> Result<AdminRegistry, ConfigError> {
        AdminRegistry::parse(&self.admin_addresses).map_err(|err| {
            ConfigError::InvalidAdminAddress {
                address: err.address.clone(),
                reason: err.source.to_string(),
            }
        })
    }
}
