//! # Admin Lifecycle Flows
//!
//! The verifier (ab-01) and the ledger (ab-02) working together: a quorum
//! draft is staged, an administrator wallet signs the canonical digest, and
//! the decision drives the record through its lifecycle.

#[cfg(test)]
mod tests {
    use crate::support::{address_of, admin_ledger, approved_draft, sign_approval, signing_key, wait_until};
    use ab_02_pending_ledger::{Decision, DispatchError, LedgerError, TransactionState};
    use shared_types::TransactionId;
    use std::time::Duration;

    const NEVER: Duration = Duration::from_secs(600);

    #[tokio::test]
    async fn test_full_approval_lifecycle() {
        let key = signing_key(0x42);
        let (ledger, dispatcher) = admin_ledger(&key, NEVER);
        let id = TransactionId::from("0xabc");

        let submitted = ledger.submit(approved_draft("0xabc")).unwrap();
        assert!(submitted.created);
        assert_eq!(submitted.state, TransactionState::PendingAdminApproval);

        let decided = ledger
            .decide(
                &id,
                &address_of(&key),
                &sign_approval(&key, "0xabc", 0),
                Decision::Approve,
            )
            .unwrap();
        assert_eq!(decided.state, TransactionState::AdminApproved);
        assert_eq!(decided.next_nonce, 1);

        let executed = ledger.execute(&id).await.unwrap();
        assert_eq!(executed.state, TransactionState::Executed);
        assert!(!executed.already_executed);
        assert_eq!(dispatcher.dispatched(), vec![id.clone()]);

        let record = ledger.status(&id).unwrap();
        assert!(record.executed_at.is_some());
        assert_eq!(
            record.admin_decision.as_ref().unwrap().signer_address,
            address_of(&key)
        );
    }

    #[tokio::test]
    async fn test_rejection_is_terminal() {
        let key = signing_key(0x42);
        let (ledger, dispatcher) = admin_ledger(&key, NEVER);
        let id = TransactionId::from("0xabc");
        ledger.submit(approved_draft("0xabc")).unwrap();

        let decided = ledger
            .decide(
                &id,
                &address_of(&key),
                &sign_approval(&key, "0xabc", 0),
                Decision::Reject,
            )
            .unwrap();
        assert_eq!(decided.state, TransactionState::AdminRejected);

        let err = ledger.execute(&id).await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidTransition { .. }));
        assert_eq!(dispatcher.dispatch_count(), 0);
    }

    #[tokio::test]
    async fn test_nonce_advances_across_transactions() {
        let key = signing_key(0x42);
        let (ledger, _) = admin_ledger(&key, NEVER);
        let signer = address_of(&key);

        for (index, id) in ["0xaaa", "0xbbb", "0xccc"].iter().enumerate() {
            ledger.submit(approved_draft(id)).unwrap();
            let outcome = ledger
                .decide(
                    &TransactionId::from(*id),
                    &signer,
                    &sign_approval(&key, id, index as u64),
                    Decision::Approve,
                )
                .unwrap();
            assert_eq!(outcome.next_nonce, index as u64 + 1);
        }
        assert_eq!(ledger.nonce_of(&signer), 3);
    }

    #[tokio::test]
    async fn test_replayed_signature_rejected_without_nonce_burn() {
        let key = signing_key(0x42);
        let (ledger, _) = admin_ledger(&key, NEVER);
        let signer = address_of(&key);
        ledger.submit(approved_draft("0xaaa")).unwrap();
        ledger.submit(approved_draft("0xbbb")).unwrap();

        let signature = sign_approval(&key, "0xaaa", 0);
        ledger
            .decide(&TransactionId::from("0xaaa"), &signer, &signature, Decision::Approve)
            .unwrap();

        // Replaying the consumed signature against another record fails: the
        // registry moved to nonce 1 and the digest binds the old id anyway.
        let err = ledger
            .decide(&TransactionId::from("0xbbb"), &signer, &signature, Decision::Approve)
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidSignature { .. }));
        assert_eq!(ledger.nonce_of(&signer), 1);

        // A fresh signature at the current nonce still works.
        ledger
            .decide(
                &TransactionId::from("0xbbb"),
                &signer,
                &sign_approval(&key, "0xbbb", 1),
                Decision::Approve,
            )
            .unwrap();
    }

    #[tokio::test]
    async fn test_approval_auto_executes_after_delay() {
        let key = signing_key(0x42);
        let (ledger, dispatcher) = admin_ledger(&key, Duration::from_millis(20));
        let id = TransactionId::from("0xabc");
        ledger.submit(approved_draft("0xabc")).unwrap();

        ledger
            .decide(
                &id,
                &address_of(&key),
                &sign_approval(&key, "0xabc", 0),
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
        assert_eq!(dispatcher.dispatch_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_dispatch_leaves_record_retryable() {
        let key = signing_key(0x42);
        let (ledger, dispatcher) = admin_ledger(&key, NEVER);
        let id = TransactionId::from("0xabc");
        ledger.submit(approved_draft("0xabc")).unwrap();
        ledger
            .decide(
                &id,
                &address_of(&key),
                &sign_approval(&key, "0xabc", 0),
                Decision::Approve,
            )
            .unwrap();

        dispatcher.fail_with(DispatchError::Unavailable("settlement down".to_string()));
        assert!(matches!(
            ledger.execute(&id).await.unwrap_err(),
            LedgerError::DispatchFailed { .. }
        ));
        assert_eq!(
            ledger.status(&id).unwrap().state,
            TransactionState::AdminApproved
        );

        dispatcher.clear_failure();
        let outcome = ledger.execute(&id).await.unwrap();
        assert_eq!(outcome.state, TransactionState::Executed);
    }
}
