//! # Ledger Errors
//!
//! Failure modes of the ledger operations. Each variant maps to exactly one
//! API error kind, so handlers can translate without inspecting messages.

use crate::domain::state::TransactionState;
use shared_types::{EthAddress, TransactionId};
use thiserror::Error;

/// Errors surfaced by ledger operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The request was malformed or missing required fields.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The signer is not in the administrator set.
    #[error("signer {signer} is not an authorized administrator")]
    UnauthorizedSigner {
        /// The claimed signer address.
        signer: EthAddress,
    },

    /// No record with the given id exists.
    #[error("transaction {id} not found")]
    NotFound {
        /// The requested transaction id.
        id: TransactionId,
    },

    /// The record exists but is not in the state the operation requires.
    #[error("transaction {id} is {actual}, expected {required}")]
    InvalidTransition {
        /// The requested transaction id.
        id: TransactionId,
        /// State the record is actually in.
        actual: TransactionState,
        /// State the operation requires.
        required: TransactionState,
    },

    /// The signature did not verify against the signer's current nonce.
    /// The nonce is not consumed.
    #[error("signature verification failed for transaction {id} by {signer}")]
    InvalidSignature {
        /// The requested transaction id.
        id: TransactionId,
        /// The claimed signer address.
        signer: EthAddress,
    },

    /// Settlement dispatch failed; the record stays `ADMIN_APPROVED`.
    #[error("execution dispatch failed for transaction {id}: {reason}")]
    DispatchFailed {
        /// The requested transaction id.
        id: TransactionId,
        /// Dispatcher-reported reason.
        reason: String,
    },
}
