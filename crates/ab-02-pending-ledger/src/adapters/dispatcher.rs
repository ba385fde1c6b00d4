//! # Logging Dispatcher
//!
//! The default settlement adapter. On-chain execution is performed by the
//! consensus contract itself once the admin approval lands, so the bridge's
//! own "dispatch" is an audit acknowledgement: log the settlement with its
//! evidence and let the state machine record `EXECUTED`.

use crate::domain::entities::BridgeTransaction;
use crate::ports::outbound::{DispatchError, ExecutionDispatcher};
use async_trait::async_trait;
use tracing::info;

/// Dispatcher that acknowledges settlement by structured log line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingDispatcher;

impl LoggingDispatcher {
    /// A new logging dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ExecutionDispatcher for LoggingDispatcher {
    async fn dispatch(&self, record: &BridgeTransaction) -> Result<(), DispatchError> {
        info!(
            transaction_id = %record.id,
            campaign = %record.campaign_id,
            publisher = %record.publisher_address,
            approve_votes = %record.consensus_evidence.approve_votes,
            total_votes = %record.consensus_evidence.total_votes,
            "Settlement dispatched"
        );
        Ok(())
    }
}
