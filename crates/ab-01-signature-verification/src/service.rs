//! # Verification Service
//!
//! The verdict facade the approval ledger consults during `Decide`. Wires the
//! canonical digest to ECDSA recovery and collapses every failure mode into a
//! boolean verdict, logging the underlying reason for the audit trail.

use crate::domain::digest::{approval_digest, personal_message_hash};
use crate::domain::ecdsa::recover_signer;
use crate::domain::errors::SignatureError;
use shared_types::{EthAddress, SignatureBytes, TransactionId};
use tracing::debug;

/// Verifies administrator approval signatures.
#[derive(Debug, Clone, Default)]
pub struct ApprovalVerifier;

impl ApprovalVerifier {
    /// Create a new verifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Check a decision signature, reporting the failure reason.
    ///
    /// The signature must cover the canonical digest for
    /// `(transaction id, claimed signer, nonce)` and recover to the claimed
    /// signer. Address comparison is byte equality over parsed addresses, so
    /// hex casing never matters.
    pub fn check(
        &self,
        tx_id: &TransactionId,
        claimed_signer: &EthAddress,
        nonce: u64,
        signature: &SignatureBytes,
    ) -> Result<(), SignatureError> {
        let inner = approval_digest(tx_id, claimed_signer, nonce);
        let prehash = personal_message_hash(&inner);

        let recovered = recover_signer(&prehash, signature)?;
        if recovered != *claimed_signer {
            return Err(SignatureError::SignerMismatch {
                expected: claimed_signer.to_string(),
                recovered: recovered.to_string(),
            });
        }

        Ok(())
    }

    /// Boolean verdict over [`Self::check`]. Malformed input is a `false`
    /// verdict, never an error or panic.
    #[must_use]
    pub fn verify(
        &self,
        tx_id: &TransactionId,
        claimed_signer: &EthAddress,
        nonce: u64,
        signature: &SignatureBytes,
    ) -> bool {
        match self.check(tx_id, claimed_signer, nonce, signature) {
            Ok(()) => true,
            Err(reason) => {
                debug!(
                    transaction_id = %tx_id,
                    signer = %claimed_signer,
                    nonce,
                    %reason,
                    "Signature rejected"
                );
                false
            }
        }
    }
}
