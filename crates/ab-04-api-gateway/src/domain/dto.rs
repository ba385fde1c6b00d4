//! Request and response bodies.
//!
//! Wire forms are camelCase. Request fields are lenient — missing strings
//! deserialize as empty and are validated by the handlers, so a sloppy client
//! gets the structured `VALIDATION_ERROR` envelope instead of a bare
//! deserialization rejection.

use ab_02_pending_ledger::{
    BridgeTransaction, ConsensusEvidence, Decision, TransactionDraft, TransactionState,
    ZERO_METADATA_HASH,
};
use serde::{Deserialize, Serialize};
use shared_types::{EthAddress, TransactionId};

use super::error::ApiError;

/// Body of `POST /api/transactions/submit`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitRequest {
    /// On-chain click/transaction hash; the ledger primary key.
    pub id: String,
    /// Hash of the click event; defaults to `id` when absent.
    pub click_hash: String,
    /// Campaign the click belongs to.
    pub campaign_id: String,
    /// Publisher address credited by settlement.
    pub publisher: String,
    /// Gateway address that relayed the click.
    pub gateway: String,
    /// Proposal time, Unix seconds.
    pub timestamp: u64,
    /// IPFS metadata hash; defaults to the zero hash when absent.
    pub metadata_hash: String,
    /// Vote-tally snapshot from the quorum event. A missing or unapproved
    /// snapshot fails validation at intake.
    pub consensus_evidence: ConsensusEvidence,
}

impl Default for SubmitRequest {
    fn default() -> Self {
        Self {
            id: String::new(),
            click_hash: String::new(),
            campaign_id: String::new(),
            publisher: String::new(),
            gateway: String::new(),
            timestamp: 0,
            metadata_hash: String::new(),
            consensus_evidence: ConsensusEvidence::default(),
        }
    }
}

impl SubmitRequest {
    /// Normalize into a ledger draft, applying the default-substitution
    /// rules for absent fields.
    #[must_use]
    pub fn into_draft(self) -> TransactionDraft {
        let click_hash = if self.click_hash.is_empty() {
            self.id.clone()
        } else {
            self.click_hash
        };
        let metadata_hash = if self.metadata_hash.is_empty() {
            ZERO_METADATA_HASH.to_string()
        } else {
            self.metadata_hash
        };
        TransactionDraft {
            id: TransactionId::new(self.id),
            click_hash,
            campaign_id: self.campaign_id,
            publisher_address: self.publisher,
            gateway_address: self.gateway,
            timestamp: self.timestamp,
            metadata_hash,
            consensus_evidence: self.consensus_evidence,
        }
    }
}

/// Body of `POST /api/transactions/approve`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecideRequest {
    /// The transaction to decide.
    pub id: String,
    /// 65-byte signature over the canonical approval digest, 0x-hex.
    pub signature: String,
    /// Address of the deciding administrator.
    pub signer_address: String,
    /// `"approve"` or `"reject"`.
    pub decision: String,
}

impl DecideRequest {
    /// Validate field presence and parse the typed pieces.
    ///
    /// Field-presence problems are `VALIDATION_ERROR`; a signature that is
    /// not 65 hex-encoded bytes can never verify, so it reports
    /// `INVALID_SIGNATURE` directly.
    pub fn parse(&self) -> Result<(TransactionId, EthAddress, shared_types::SignatureBytes, Decision), ApiError> {
        if self.id.is_empty() {
            return Err(ApiError::validation("id is required"));
        }
        if self.signer_address.is_empty() {
            return Err(ApiError::validation("signerAddress is required"));
        }
        if self.signature.is_empty() {
            return Err(ApiError::validation("signature is required"));
        }
        let decision = match self.decision.as_str() {
            "approve" => Decision::Approve,
            "reject" => Decision::Reject,
            "" => return Err(ApiError::validation("decision is required")),
            other => {
                return Err(ApiError::validation(format!(
                    "decision must be 'approve' or 'reject', got '{other}'"
                )))
            }
        };
        let signer: EthAddress = self.signer_address.parse().map_err(|_| {
            ApiError::validation(format!(
                "signerAddress '{}' is not a valid address",
                self.signer_address
            ))
        })?;
        let signature = self
            .signature
            .parse()
            .map_err(|_| ApiError::invalid_signature("signature is not 65 hex-encoded bytes"))?;
        Ok((TransactionId::new(self.id.clone()), signer, signature, decision))
    }
}

/// Body of `POST /api/transactions/execute`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecuteRequest {
    /// The approved transaction to execute.
    pub id: String,
}

/// Success envelope for submissions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub transaction_id: TransactionId,
    pub state: TransactionState,
}

/// Success envelope for decisions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResponse {
    pub success: bool,
    pub message: String,
    pub transaction_id: TransactionId,
    pub state: TransactionState,
    /// The nonce the signer must use for their next signature.
    pub next_nonce: u64,
}

/// Success envelope for executions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResponse {
    pub success: bool,
    pub message: String,
    pub transaction_id: TransactionId,
    pub state: TransactionState,
    /// True when the record was already executed and the call was a no-op.
    pub already_executed: bool,
}

/// Response of `GET /api/transactions/pending`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingListResponse {
    pub count: usize,
    /// Oldest submission first.
    pub transactions: Vec<BridgeTransaction>,
}

/// Response of `GET /api/admin/nonce/{address}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NonceResponse {
    pub address: EthAddress,
    pub nonce: u64,
}

/// Response of `GET /api/admin/config`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminConfigResponse {
    /// Configured administrator addresses, lower-cased, stable order.
    pub admin_signers: Vec<EthAddress>,
    pub admin_count: usize,
    pub pending_count: usize,
}
