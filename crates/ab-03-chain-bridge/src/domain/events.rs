//! # Consensus Events
//!
//! The two shapes the bridge reads from the chain: the lightweight quorum
//! notification and the full transaction detail behind it, plus the
//! normalization that turns both into a ledger draft.
//!
//! On-chain reads are treated as untrusted input. Vote counts are 256-bit
//! integers that may arrive null or empty; they normalize to `"0"` instead
//! of failing, so one malformed field never drops an otherwise valid event.

use ab_02_pending_ledger::{ConsensusEvidence, TransactionDraft, ZERO_METADATA_HASH};
use serde::{Deserialize, Serialize};
use shared_types::TransactionId;

/// A "quorum reached" notification from the consensus contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuorumNotification {
    /// The on-chain click/transaction hash.
    pub transaction_id: TransactionId,
    /// Whether the quorum approved the transaction.
    pub approved: bool,
    /// Votes cast when the quorum was reached.
    #[serde(default)]
    pub vote_count: u64,
}

/// Full on-chain transaction detail, as returned by the contract read.
///
/// Every field the contract may omit is optional here; normalization decides
/// the fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTransactionDetails {
    /// Campaign the click belongs to.
    pub campaign_id: Option<String>,
    /// Publisher address credited by settlement.
    pub publisher: Option<String>,
    /// Gateway address that relayed the click.
    pub gateway: Option<String>,
    /// Approve votes, decimal string.
    pub approve_votes: Option<String>,
    /// Reject votes, decimal string.
    pub reject_votes: Option<String>,
    /// Total votes cast, decimal string.
    pub total_votes: Option<String>,
    /// Quorum threshold, decimal string.
    pub required_votes: Option<String>,
    /// Whether the contract already executed the transaction on chain.
    pub executed: bool,
    /// Whether the contract reports the quorum as reached.
    pub consensus_reached: bool,
    /// Proposal time, Unix seconds.
    pub proposal_time: Option<u64>,
}

fn normalized_count(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "0".to_string(),
    }
}

impl RawTransactionDetails {
    /// Normalize the on-chain detail into a ledger draft.
    ///
    /// The click hash doubles as the transaction id; the contract exposes no
    /// metadata hash on this read, so drafts carry the zero hash.
    #[must_use]
    pub fn into_draft(self, notification: &QuorumNotification) -> TransactionDraft {
        let id = notification.transaction_id.clone();
        TransactionDraft {
            click_hash: id.as_str().to_string(),
            campaign_id: self.campaign_id.unwrap_or_default(),
            publisher_address: self.publisher.unwrap_or_default(),
            gateway_address: self.gateway.unwrap_or_default(),
            timestamp: self.proposal_time.unwrap_or(0),
            metadata_hash: ZERO_METADATA_HASH.to_string(),
            consensus_evidence: ConsensusEvidence {
                approved: notification.approved,
                approve_votes: normalized_count(self.approve_votes),
                total_votes: normalized_count(self.total_votes),
                required_votes: normalized_count(self.required_votes),
                consensus_reached: self.consensus_reached,
            },
            id,
        }
    }
}
