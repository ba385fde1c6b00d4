//! Fixtures and signing helpers shared by the integration flows.

use ab_01_signature_verification::{
    address_from_verifying_key, approval_digest, personal_message_hash,
};
use ab_02_pending_ledger::{
    AdminRegistry, ApprovalLedger, ConsensusEvidence, MockDispatcher, TransactionDraft,
};
use k256::ecdsa::SigningKey;
use shared_types::{EthAddress, SignatureBytes, TransactionId};
use std::sync::Arc;
use std::time::Duration;

/// Deterministic signing key from a one-byte seed.
pub fn signing_key(seed: u8) -> SigningKey {
    let mut scalar = [seed; 32];
    // Keep the scalar inside the curve order for any seed.
    scalar[0] = 0x01;
    SigningKey::from_slice(&scalar).expect("valid scalar")
}

/// Wallet address of a signing key.
pub fn address_of(key: &SigningKey) -> EthAddress {
    address_from_verifying_key(key.verifying_key())
}

/// Produce the 65-byte recoverable signature an administrator wallet would
/// send for the given transaction and nonce.
pub fn sign_approval(key: &SigningKey, id: &str, nonce: u64) -> SignatureBytes {
    let digest = approval_digest(&TransactionId::from(id), &address_of(key), nonce);
    let prehash = personal_message_hash(&digest);
    let (signature, recovery_id) = key.sign_prehash_recoverable(&prehash).expect("signing");

    let mut out = [0u8; 65];
    out[..32].copy_from_slice(&signature.r().to_bytes());
    out[32..64].copy_from_slice(&signature.s().to_bytes());
    out[64] = recovery_id.to_byte() + 27;
    SignatureBytes::new(out)
}

/// A quorum-approved draft ready for submission.
pub fn approved_draft(id: &str) -> TransactionDraft {
    TransactionDraft {
        id: TransactionId::from(id),
        click_hash: id.to_string(),
        campaign_id: "campaign-7".to_string(),
        publisher_address: "0x1111111111111111111111111111111111111111".to_string(),
        gateway_address: "0x2222222222222222222222222222222222222222".to_string(),
        timestamp: 1_700_000_000,
        metadata_hash: "QmTestMetadata".to_string(),
        consensus_evidence: ConsensusEvidence::approved("3", "4", "3"),
    }
}

/// Ledger with a single administrator and a mock dispatcher.
pub fn admin_ledger(
    key: &SigningKey,
    auto_execute_delay: Duration,
) -> (ApprovalLedger, Arc<MockDispatcher>) {
    let dispatcher = Arc::new(MockDispatcher::new());
    let ledger = ApprovalLedger::with_admins(
        AdminRegistry::new([address_of(key)]),
        dispatcher.clone(),
        auto_execute_delay,
    );
    (ledger, dispatcher)
}

/// Poll a condition for up to two seconds.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached within 2s");
}
