//! # Signature Verification Subsystem (AB-01)
//!
//! Authenticates administrator decisions for Approval-Bridge.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Pure cryptographic logic, no I/O
//! - **Service Layer** (`service.rs`): The verdict facade used by the ledger
//!
//! ## Signing Convention
//!
//! Administrator wallets sign the canonical approval digest:
//!
//! 1. `keccak256("ADMIN_APPROVAL_V1" ∥ transaction-id ∥ signer ∥ nonce₂₅₆)`
//!    (solidity packed encoding; the transaction id contributes its literal
//!    string bytes, the signer its 20 raw bytes, the nonce a big-endian
//!    256-bit word)
//! 2. `keccak256("\x19Ethereum Signed Message:\n32" ∥ digest)` — the
//!    personal-message wrap browser wallets apply
//! 3. 65-byte `r ‖ s ‖ v` recoverable signature over the wrapped hash
//!
//! Any deviation from this byte layout breaks verification of externally
//! produced signatures, so the digest functions here are the only place the
//! convention is encoded.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: Signatures with high S values are
//!   rejected
//! - **Closed verdicts**: Malformed signatures are a `false` verdict, never a
//!   panic or propagated error

pub mod domain;

mod service;

// Re-export public API
pub use domain::digest::{
    approval_digest, keccak256, personal_message_hash, APPROVAL_DOMAIN_TAG,
};
pub use domain::ecdsa::{address_from_verifying_key, invert_s, recover_signer};
pub use domain::errors::SignatureError;
pub use service::ApprovalVerifier;
