//! # Chain Bridge Flows
//!
//! Quorum notifications travelling the whole path: consensus feed (ab-03)
//! into the ledger (ab-02), then an administrator decision and settlement.

#[cfg(test)]
mod tests {
    use crate::support::{address_of, admin_ledger, sign_approval, signing_key, wait_until};
    use ab_02_pending_ledger::{Decision, TransactionState};
    use ab_03_chain_bridge::{
        ChainEventBridge, InMemoryConsensusFeed, QuorumNotification, RawTransactionDetails,
    };
    use shared_types::TransactionId;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::watch;

    fn notification(id: &str, approved: bool) -> QuorumNotification {
        QuorumNotification {
            transaction_id: TransactionId::from(id),
            approved,
            vote_count: 4,
        }
    }

    fn chain_details() -> RawTransactionDetails {
        RawTransactionDetails {
            campaign_id: Some("campaign-7".to_string()),
            publisher: Some("0x1111111111111111111111111111111111111111".to_string()),
            gateway: Some("0x2222222222222222222222222222222222222222".to_string()),
            approve_votes: Some("3".to_string()),
            reject_votes: Some("1".to_string()),
            total_votes: Some("4".to_string()),
            required_votes: Some("3".to_string()),
            executed: false,
            consensus_reached: true,
            proposal_time: Some(1_700_000_000),
        }
    }

    #[tokio::test]
    async fn test_quorum_event_to_settlement() {
        let key = signing_key(0x42);
        let (ledger, dispatcher) = admin_ledger(&key, Duration::from_millis(20));
        let feed = Arc::new(InMemoryConsensusFeed::new());

        let bridge = ChainEventBridge::new(feed.clone(), ledger.clone());
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let _handle = tokio::spawn(bridge.run(shutdown_rx));

        let probe = feed.clone();
        wait_until(move || probe.subscriber_count() >= 1).await;

        // The chain reports a reached quorum.
        let id = TransactionId::from("0xclick");
        feed.insert_details(id.clone(), chain_details());
        feed.emit(notification("0xclick", true));

        let probe = ledger.clone();
        wait_until(move || probe.pending_count() == 1).await;
        let record = ledger.status(&id).unwrap();
        assert_eq!(record.state, TransactionState::PendingAdminApproval);
        assert_eq!(record.campaign_id, "campaign-7");

        // The administrator approves; the scheduled execution settles it.
        ledger
            .decide(
                &id,
                &address_of(&key),
                &sign_approval(&key, "0xclick", 0),
                Decision::Approve,
            )
            .unwrap();

        let probe = ledger.clone();
        let probe_id = id.clone();
        wait_until(move || {
            probe
                .status(&probe_id)
                .map(|r| r.state == TransactionState::Executed)
                .unwrap_or(false)
        })
        .await;
        assert_eq!(dispatcher.dispatched(), vec![id]);
    }

    #[tokio::test]
    async fn test_rejected_quorum_never_reaches_admins() {
        let key = signing_key(0x42);
        let (ledger, _) = admin_ledger(&key, Duration::from_secs(600));
        let feed = Arc::new(InMemoryConsensusFeed::new());

        let bridge = ChainEventBridge::new(feed.clone(), ledger.clone());
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let _handle = tokio::spawn(bridge.run(shutdown_rx));

        let probe = feed.clone();
        wait_until(move || probe.subscriber_count() >= 1).await;

        feed.insert_details(TransactionId::from("0xrejected"), chain_details());
        feed.insert_details(TransactionId::from("0xapproved"), chain_details());
        feed.emit(notification("0xrejected", false));
        feed.emit(notification("0xapproved", true));

        let probe = ledger.clone();
        wait_until(move || probe.pending_count() == 1).await;
        assert!(ledger.status(&TransactionId::from("0xrejected")).is_err());
        assert_eq!(ledger.list_pending()[0].id.as_str(), "0xapproved");
    }

    #[tokio::test]
    async fn test_duplicate_quorum_events_keep_one_record() {
        let key = signing_key(0x42);
        let (ledger, _) = admin_ledger(&key, Duration::from_secs(600));
        let feed = Arc::new(InMemoryConsensusFeed::new());

        let bridge = ChainEventBridge::new(feed.clone(), ledger.clone());
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let _handle = tokio::spawn(bridge.run(shutdown_rx));

        let probe = feed.clone();
        wait_until(move || probe.subscriber_count() >= 1).await;

        let id = TransactionId::from("0xclick");
        feed.insert_details(id.clone(), chain_details());
        feed.emit(notification("0xclick", true));
        feed.emit(notification("0xclick", true));
        feed.emit(notification("0xclick", true));

        let probe = ledger.clone();
        wait_until(move || probe.pending_count() >= 1).await;
        // The loop processes in order; give the duplicates a moment to drain.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(ledger.pending_count(), 1);
    }

    #[tokio::test]
    async fn test_bridge_shutdown_leaves_ledger_intact() {
        let key = signing_key(0x42);
        let (ledger, _) = admin_ledger(&key, Duration::from_secs(600));
        let feed = Arc::new(InMemoryConsensusFeed::new());

        let bridge = ChainEventBridge::new(feed.clone(), ledger.clone());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(bridge.run(shutdown_rx));

        let probe = feed.clone();
        wait_until(move || probe.subscriber_count() >= 1).await;

        feed.insert_details(TransactionId::from("0xclick"), chain_details());
        feed.emit(notification("0xclick", true));
        let probe = ledger.clone();
        wait_until(move || probe.pending_count() == 1).await;

        shutdown_tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("bridge loop did not stop")
            .unwrap();
        assert_eq!(ledger.pending_count(), 1);
    }
}
