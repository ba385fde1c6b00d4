//! # Canonical Approval Digest
//!
//! Builds the exact byte sequence administrator wallets sign. The layout is
//! fixed by the external signing convention and must match bit-for-bit:
//!
//! ```text
//! inner  = keccak256( "ADMIN_APPROVAL_V1"        UTF-8, no length prefix
//!                   ∥ transaction id              UTF-8 string bytes, verbatim
//!                   ∥ signer address              20 raw bytes
//!                   ∥ nonce                       32-byte big-endian word )
//! signed = keccak256( "\x19Ethereum Signed Message:\n32" ∥ inner )
//! ```
//!
//! The inner hash is the solidity packed-keccak form; the outer hash is the
//! personal-message wrap applied by wallet `personal_sign` over the 32 raw
//! digest bytes (hence the fixed `32` length in the prefix).

use sha3::{Digest, Keccak256};
use shared_types::{EthAddress, TransactionId};

/// Protocol tag leading every approval digest. Versioned so a future digest
/// layout change cannot collide with signatures produced under this one.
pub const APPROVAL_DOMAIN_TAG: &str = "ADMIN_APPROVAL_V1";

/// Prefix of the personal-message wrap for a 32-byte payload.
const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Keccak256 hash function.
#[must_use]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// The inner packed digest over `(tag, transaction id, signer, nonce)`.
#[must_use]
pub fn approval_digest(tx_id: &TransactionId, signer: &EthAddress, nonce: u64) -> [u8; 32] {
    let id_bytes = tx_id.as_str().as_bytes();

    let mut packed = Vec::with_capacity(APPROVAL_DOMAIN_TAG.len() + id_bytes.len() + 20 + 32);
    packed.extend_from_slice(APPROVAL_DOMAIN_TAG.as_bytes());
    packed.extend_from_slice(id_bytes);
    packed.extend_from_slice(signer.as_bytes());
    packed.extend_from_slice(&nonce_word(nonce));

    keccak256(&packed)
}

/// The personal-message wrap over a 32-byte inner digest. This is the hash
/// signatures are actually recovered against.
#[must_use]
pub fn personal_message_hash(inner: &[u8; 32]) -> [u8; 32] {
    let mut prefixed = Vec::with_capacity(PERSONAL_MESSAGE_PREFIX.len() + 32);
    prefixed.extend_from_slice(PERSONAL_MESSAGE_PREFIX);
    prefixed.extend_from_slice(inner);

    keccak256(&prefixed)
}

/// A u64 nonce widened to the 32-byte big-endian word of the packed encoding.
fn nonce_word(nonce: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&nonce.to_be_bytes());
    word
}
