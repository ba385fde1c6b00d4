//! # Signature Errors
//!
//! Error types for administrator signature verification. The verdict facade
//! collapses all of these to `false`; they exist so failure reasons reach the
//! audit log.

use thiserror::Error;

/// Errors that can occur while recovering a signer from a signature.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// An r or s component is outside [1, n-1].
    #[error("Signature scalar out of range")]
    ScalarOutOfRange,

    /// Signature has high S value (EIP-2 malleability protection).
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery byte (v must be 0, 1, 27, or 28).
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// The r‖s pair does not parse as a secp256k1 signature.
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Public key recovery failed for the given digest and signature.
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Recovered signer does not match the claimed signer.
    #[error("Signer mismatch: expected {expected}, recovered {recovered}")]
    SignerMismatch { expected: String, recovered: String },
}
