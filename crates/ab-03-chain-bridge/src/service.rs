//! # Chain Event Bridge Service
//!
//! The subscription loop: receive a quorum notification, fetch the on-chain
//! detail behind it, normalize, submit to the ledger. One loop per process,
//! stopped only by the shutdown signal or a closed stream.

use crate::domain::events::QuorumNotification;
use crate::ports::outbound::ConsensusEventSource;
use ab_02_pending_ledger::ApprovalLedger;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Bridges consensus quorum notifications into the approval ledger.
pub struct ChainEventBridge<S: ConsensusEventSource> {
    source: Arc<S>,
    ledger: ApprovalLedger,
}

impl<S: ConsensusEventSource> ChainEventBridge<S> {
    /// Wire a bridge to its consensus source and ledger.
    pub fn new(source: Arc<S>, ledger: ApprovalLedger) -> Self {
        Self { source, ledger }
    }

    /// Run the subscription loop until shutdown.
    ///
    /// Every notification is handled to completion before the next one is
    /// read, so a burst of duplicates resolves in delivery order.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut stream = self.source.subscribe();
        info!("Chain event bridge listening for quorum notifications");

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    info!("Chain event bridge stopping");
                    break;
                }
                maybe_notification = stream.next() => {
                    match maybe_notification {
                        Some(notification) => self.handle_notification(notification).await,
                        None => {
                            warn!("Consensus notification stream closed");
                            break;
                        }
                    }
                }
            }
        }
    }

    async fn handle_notification(&self, notification: QuorumNotification) {
        if !notification.approved {
            info!(
                transaction_id = %notification.transaction_id,
                vote_count = notification.vote_count,
                "Skipping consensus-rejected transaction"
            );
            return;
        }

        let details = match self
            .source
            .transaction_details(&notification.transaction_id)
            .await
        {
            Ok(details) => details,
            Err(error) => {
                warn!(
                    transaction_id = %notification.transaction_id,
                    %error,
                    "Failed to fetch transaction detail, skipping event"
                );
                return;
            }
        };

        debug!(
            transaction_id = %notification.transaction_id,
            approve_votes = ?details.approve_votes,
            total_votes = ?details.total_votes,
            "Fetched on-chain transaction detail"
        );

        let draft = details.into_draft(&notification);
        match self.ledger.submit(draft) {
            Ok(outcome) if outcome.created => {
                info!(
                    transaction_id = %outcome.id,
                    vote_count = notification.vote_count,
                    "Quorum transaction staged for admin approval"
                );
            }
            Ok(outcome) => {
                debug!(
                    transaction_id = %outcome.id,
                    state = %outcome.state,
                    "Duplicate quorum notification absorbed"
                );
            }
            Err(error) => {
                warn!(
                    transaction_id = %notification.transaction_id,
                    %error,
                    "Ledger rejected bridged transaction"
                );
            }
        }
    }
}
