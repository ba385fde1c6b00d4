//! # Administrator Identity Set
//!
//! The fixed set of wallet addresses allowed to decide transactions.
//! Configured at startup and never mutated by the authorization flow;
//! membership is the first check every decision passes through.

use shared_types::{AddressParseError, EthAddress};
use std::collections::HashSet;
use thiserror::Error;

/// A configured administrator address that failed to parse.
#[derive(Debug, Clone, Error)]
#[error("invalid administrator address '{address}': {source}")]
pub struct AdminParseError {
    /// The offending configured string.
    pub address: String,
    /// What was wrong with it.
    #[source]
    pub source: AddressParseError,
}

/// The set of addresses authorized to approve or reject transactions.
///
/// Addresses are stored parsed, so membership checks are case-insensitive
/// regardless of how the config or the request spelled them.
#[derive(Debug, Clone, Default)]
pub struct AdminRegistry {
    members: HashSet<EthAddress>,
}

impl AdminRegistry {
    /// Build from already-parsed addresses.
    #[must_use]
    pub fn new(members: impl IntoIterator<Item = EthAddress>) -> Self {
        Self {
            members: members.into_iter().collect(),
        }
    }

    /// Parse a list of configured address strings. Duplicates collapse.
    pub fn parse<I, S>(addresses: I) -> Result<Self, AdminParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut members = HashSet::new();
        for address in addresses {
            let address = address.as_ref().trim();
            let parsed = address.parse().map_err(|source| AdminParseError {
                address: address.to_string(),
                source,
            })?;
            members.insert(parsed);
        }
        Ok(Self { members })
    }

    /// Membership check.
    #[must_use]
    pub fn contains(&self, address: &EthAddress) -> bool {
        self.members.contains(address)
    }

    /// Number of configured administrators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when no administrator is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The members in a stable order, for display endpoints.
    #[must_use]
    pub fn members(&self) -> Vec<EthAddress> {
        let mut members: Vec<_> = self.members.iter().copied().collect();
        members.sort();
        members
    }
}
