//! # Ledger Entities
//!
//! The transaction record and its immutable parts. A record is born from a
//! [`TransactionDraft`] at submission, gains an [`AdminDecision`] exactly once,
//! and never loses a field afterwards.
//!
//! Wire forms are camelCase, matching the admin dashboard and the consensus
//! event payloads.

use crate::domain::state::TransactionState;
use serde::{Deserialize, Serialize};
use shared_types::{EthAddress, SignatureBytes, TransactionId, UnixMillis};
use std::fmt;

/// 32-byte zero hash, the placeholder for transactions without IPFS metadata.
pub const ZERO_METADATA_HASH: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000000";

fn zero_count() -> String {
    "0".to_string()
}

/// Snapshot of the on-chain vote tally, captured at submission time.
///
/// Vote counts arrive as decimal strings because the contract returns 256-bit
/// integers; missing or null counts normalize to `"0"` rather than failing
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsensusEvidence {
    /// Outcome flag from the quorum event. Submissions with `false` are
    /// rejected at intake.
    pub approved: bool,
    /// Approve votes cast, decimal string.
    pub approve_votes: String,
    /// Total votes cast, decimal string.
    pub total_votes: String,
    /// Quorum threshold, decimal string.
    pub required_votes: String,
    /// Whether the contract reported the quorum as reached.
    pub consensus_reached: bool,
}

impl Default for ConsensusEvidence {
    fn default() -> Self {
        Self {
            approved: false,
            approve_votes: zero_count(),
            total_votes: zero_count(),
            required_votes: zero_count(),
            consensus_reached: false,
        }
    }
}

impl ConsensusEvidence {
    /// Evidence for a reached, approving quorum.
    #[must_use]
    pub fn approved(approve_votes: &str, total_votes: &str, required_votes: &str) -> Self {
        Self {
            approved: true,
            approve_votes: approve_votes.to_string(),
            total_votes: total_votes.to_string(),
            required_votes: required_votes.to_string(),
            consensus_reached: true,
        }
    }
}

/// An administrator's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Authorize the transaction for execution.
    Approve,
    /// Refuse the transaction. Terminal.
    Reject,
}

impl Decision {
    /// The wire-form verb.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::Reject => "reject",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The decision attached to a record on the pending → decided transition.
///
/// Set exactly once; immutable after. The signature is retained for audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDecision {
    /// Address recovered from and claimed by the deciding administrator.
    pub signer_address: EthAddress,
    /// The 65-byte signature the administrator produced.
    pub signature: SignatureBytes,
    /// Approve or reject.
    pub decision: Decision,
}

/// Input to `Submit`: everything known about a transaction before it enters
/// the ledger. Produced by the chain bridge or by the intake endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    /// On-chain click/transaction hash; the ledger primary key.
    pub id: TransactionId,
    /// Hash of the click event under verification.
    pub click_hash: String,
    /// Campaign the click belongs to.
    pub campaign_id: String,
    /// Publisher address credited by settlement.
    pub publisher_address: String,
    /// Gateway address that relayed the click.
    pub gateway_address: String,
    /// Proposal time from the consensus contract, Unix seconds.
    pub timestamp: u64,
    /// IPFS metadata hash, or [`ZERO_METADATA_HASH`] when absent.
    pub metadata_hash: String,
    /// Vote-tally snapshot from the quorum event.
    pub consensus_evidence: ConsensusEvidence,
}

/// A transaction held by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeTransaction {
    /// On-chain click/transaction hash; the ledger primary key.
    pub id: TransactionId,
    /// Hash of the click event under verification.
    pub click_hash: String,
    /// Campaign the click belongs to.
    pub campaign_id: String,
    /// Publisher address credited by settlement.
    pub publisher_address: String,
    /// Gateway address that relayed the click.
    pub gateway_address: String,
    /// Proposal time from the consensus contract, Unix seconds.
    pub timestamp: u64,
    /// IPFS metadata hash, or [`ZERO_METADATA_HASH`] when absent.
    pub metadata_hash: String,
    /// Vote-tally snapshot, immutable after submission.
    pub consensus_evidence: ConsensusEvidence,
    /// Current lifecycle state.
    pub state: TransactionState,
    /// The administrator's verdict, once given.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub admin_decision: Option<AdminDecision>,
    /// When the record entered the ledger, Unix millis.
    pub submitted_at: UnixMillis,
    /// When the administrator decided, Unix millis.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub decided_at: Option<UnixMillis>,
    /// When settlement was recorded, Unix millis.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub executed_at: Option<UnixMillis>,
}

impl BridgeTransaction {
    /// Materialize a freshly submitted record in the pending state.
    #[must_use]
    pub fn from_draft(draft: TransactionDraft, submitted_at: UnixMillis) -> Self {
        Self {
            id: draft.id,
            click_hash: draft.click_hash,
            campaign_id: draft.campaign_id,
            publisher_address: draft.publisher_address,
            gateway_address: draft.gateway_address,
            timestamp: draft.timestamp,
            metadata_hash: draft.metadata_hash,
            consensus_evidence: draft.consensus_evidence,
            state: TransactionState::PendingAdminApproval,
            admin_decision: None,
            submitted_at,
            decided_at: None,
            executed_at: None,
        }
    }
}
