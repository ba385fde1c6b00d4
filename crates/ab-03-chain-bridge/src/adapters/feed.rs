//! # In-Memory Consensus Feed
//!
//! Broadcast-channel consensus source for single-node operation and tests.
//! Notifications fan out to every subscriber; transaction details are served
//! from a local table. An RPC-backed adapter would implement the same port
//! against the deployed contract.

use crate::domain::errors::UpstreamError;
use crate::domain::events::{QuorumNotification, RawTransactionDetails};
use crate::ports::outbound::{ConsensusEventSource, QuorumStream};
use crate::DEFAULT_EVENT_CAPACITY;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::TransactionId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// In-memory implementation of the consensus source.
pub struct InMemoryConsensusFeed {
    sender: broadcast::Sender<QuorumNotification>,
    details: RwLock<HashMap<TransactionId, RawTransactionDetails>>,
    available: AtomicBool,
}

impl InMemoryConsensusFeed {
    /// Feed with the default channel capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Feed with an explicit channel capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            details: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Register the detail record behind a transaction id.
    pub fn insert_details(&self, id: TransactionId, details: RawTransactionDetails) {
        self.details.write().insert(id, details);
    }

    /// Emit a quorum notification to all subscribers.
    ///
    /// Returns the number of subscribers that received it.
    pub fn emit(&self, notification: QuorumNotification) -> usize {
        let id = notification.transaction_id.clone();
        match self.sender.send(notification) {
            Ok(receivers) => {
                debug!(transaction_id = %id, receivers, "Quorum notification emitted");
                receivers
            }
            Err(_) => {
                warn!(transaction_id = %id, "Quorum notification dropped (no subscribers)");
                0
            }
        }
    }

    /// Toggle availability of the detail read, simulating an upstream outage.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Relaxed);
    }

    /// Number of active notification subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for InMemoryConsensusFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConsensusEventSource for InMemoryConsensusFeed {
    fn subscribe(&self) -> QuorumStream {
        QuorumStream::new(self.sender.subscribe())
    }

    async fn transaction_details(
        &self,
        id: &TransactionId,
    ) -> Result<RawTransactionDetails, UpstreamError> {
        if !self.available.load(Ordering::Relaxed) {
            return Err(UpstreamError::Unavailable(
                "consensus feed offline".to_string(),
            ));
        }
        self.details
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| UpstreamError::UnknownTransaction(id.clone()))
    }
}
