//! # Signer Nonce Registry
//!
//! Monotonic per-signer counters backing replay protection. Every signature
//! binds the signer's current counter into the signed digest; a successful
//! decision consumes that value, so the same signature can never authorize a
//! second transition.

use shared_types::EthAddress;
use std::collections::HashMap;

/// Per-signer monotonic counters, starting at 0 for unseen signers.
///
/// Keys are parsed addresses, so lookups are case-insensitive by
/// construction. Mutation happens only under the ledger lock.
#[derive(Debug, Default)]
pub struct NonceRegistry {
    counters: HashMap<EthAddress, u64>,
}

impl NonceRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The nonce the signer must use for their next signature.
    #[must_use]
    pub fn current(&self, signer: &EthAddress) -> u64 {
        self.counters.get(signer).copied().unwrap_or(0)
    }

    /// Consume the signer's current nonce, returning the new value.
    pub fn consume(&mut self, signer: &EthAddress) -> u64 {
        let counter = self.counters.entry(*signer).or_insert(0);
        *counter += 1;
        *counter
    }
}
