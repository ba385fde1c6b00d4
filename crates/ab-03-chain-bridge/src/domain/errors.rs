//! # Bridge Errors

use shared_types::TransactionId;
use thiserror::Error;

/// Failures reading from the consensus source.
///
/// These are transient from the bridge's point of view: the subscription
/// loop logs them, skips the event, and keeps listening.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamError {
    /// The source could not be reached.
    #[error("consensus source unavailable: {0}")]
    Unavailable(String),

    /// The source has no record for the notified transaction.
    #[error("transaction {0} not found on chain")]
    UnknownTransaction(TransactionId),
}
