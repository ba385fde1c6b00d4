//! # Outbound Ports
//!
//! The consensus contract abstraction: a notification stream plus the read
//! call behind each notification.

use crate::domain::errors::UpstreamError;
use crate::domain::events::{QuorumNotification, RawTransactionDetails};
use async_trait::async_trait;
use shared_types::TransactionId;
use tokio::sync::broadcast;
use tracing::warn;

/// A live stream of quorum notifications.
///
/// Wraps a broadcast receiver; a lagged receiver skips the dropped
/// notifications and keeps going rather than erroring out.
pub struct QuorumStream {
    receiver: broadcast::Receiver<QuorumNotification>,
}

impl QuorumStream {
    /// Wrap a broadcast receiver.
    #[must_use]
    pub fn new(receiver: broadcast::Receiver<QuorumNotification>) -> Self {
        Self { receiver }
    }

    /// Receive the next notification.
    ///
    /// Returns `None` when the feed has been dropped.
    pub async fn next(&mut self) -> Option<QuorumNotification> {
        loop {
            match self.receiver.recv().await {
                Ok(notification) => return Some(notification),
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    warn!(lagged = count, "Quorum subscriber lagged, notifications dropped");
                }
            }
        }
    }
}

/// Consensus contract access - outbound port.
#[async_trait]
pub trait ConsensusEventSource: Send + Sync {
    /// Open a stream of quorum notifications.
    fn subscribe(&self) -> QuorumStream;

    /// Fetch the full on-chain record behind a notification.
    async fn transaction_details(
        &self,
        id: &TransactionId,
    ) -> Result<RawTransactionDetails, UpstreamError>;
}
