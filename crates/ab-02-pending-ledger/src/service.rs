//! # Approval Ledger Service
//!
//! The single locked entry point shared by the HTTP handlers and the chain
//! event bridge. Owns the records, the insertion order, and the signer nonce
//! counters; every lifecycle transition happens under its lock.
//!
//! ## Concurrency
//!
//! - `Decide` performs signature verification, nonce consumption, and the
//!   state transition as one atomic unit under the lock. Two concurrent
//!   decisions on one transaction: exactly one wins, the other observes the
//!   already-decided state.
//! - `Execute` snapshots the record under the lock, dispatches settlement
//!   without holding it, then re-checks state before marking `EXECUTED`, so a
//!   scheduled auto-execution racing a manual call stays safe.
//! - Approvals spawn a delayed execution task; the abort handle is retained
//!   so shutdown can cancel every pending timer.

use crate::domain::admins::AdminRegistry;
use crate::domain::config::{ConfigError, LedgerConfig};
use crate::domain::entities::{AdminDecision, BridgeTransaction, Decision, TransactionDraft};
use crate::domain::errors::LedgerError;
use crate::domain::nonce::NonceRegistry;
use crate::domain::state::TransactionState;
use crate::ports::outbound::ExecutionDispatcher;
use ab_01_signature_verification::ApprovalVerifier;
use parking_lot::Mutex;
use shared_types::{unix_millis_now, EthAddress, SignatureBytes, TransactionId};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

/// Result of a `Submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// The submitted transaction id.
    pub id: TransactionId,
    /// State after the call: the fresh pending state, or whatever state an
    /// already-present record was in.
    pub state: TransactionState,
    /// False when the id was already present and the call was absorbed.
    pub created: bool,
}

/// Result of a successful `Decide`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionOutcome {
    /// The decided transaction id.
    pub id: TransactionId,
    /// `ADMIN_APPROVED` or `ADMIN_REJECTED`.
    pub state: TransactionState,
    /// The nonce the signer must use for their next signature.
    pub next_nonce: u64,
}

/// Result of a successful `Execute`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// The executed transaction id.
    pub id: TransactionId,
    /// Always `EXECUTED`.
    pub state: TransactionState,
    /// True when the record was already executed and the call was a no-op.
    pub already_executed: bool,
}

/// Records, insertion order, and nonce counters, guarded as one unit.
struct LedgerState {
    records: HashMap<TransactionId, BridgeTransaction>,
    order: Vec<TransactionId>,
    nonces: NonceRegistry,
}

struct LedgerInner {
    state: Mutex<LedgerState>,
    admins: AdminRegistry,
    verifier: ApprovalVerifier,
    dispatcher: Arc<dyn ExecutionDispatcher>,
    auto_execute_delay: Duration,
    scheduled: Mutex<HashMap<TransactionId, AbortHandle>>,
}

/// The pending-approval ledger. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct ApprovalLedger {
    inner: Arc<LedgerInner>,
}

impl ApprovalLedger {
    /// Build a ledger from configuration.
    pub fn new(
        config: &LedgerConfig,
        dispatcher: Arc<dyn ExecutionDispatcher>,
    ) -> Result<Self, ConfigError> {
        let admins = config.admin_registry()?;
        Ok(Self::with_admins(
            admins,
            dispatcher,
            config.auto_execute_delay,
        ))
    }

    /// Build a ledger from an already-parsed administrator set.
    #[must_use]
    pub fn with_admins(
        admins: AdminRegistry,
        dispatcher: Arc<dyn ExecutionDispatcher>,
        auto_execute_delay: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(LedgerInner {
                state: Mutex::new(LedgerState {
                    records: HashMap::new(),
                    order: Vec::new(),
                    nonces: NonceRegistry::new(),
                }),
                admins,
                verifier: ApprovalVerifier::new(),
                dispatcher,
                auto_execute_delay,
                scheduled: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Stage a transaction for administrator review.
    ///
    /// Idempotent per id: a present record is never overwritten and keeps
    /// its `submittedAt`. Drafts whose consensus evidence is not approved
    /// are rejected outright; consensus rejections carry nothing for a
    /// human to authorize.
    pub fn submit(&self, draft: TransactionDraft) -> Result<SubmitOutcome, LedgerError> {
        if draft.id.is_empty() {
            return Err(LedgerError::Validation(
                "transaction id must not be empty".to_string(),
            ));
        }
        if !draft.consensus_evidence.approved {
            return Err(LedgerError::Validation(
                "transaction has not been approved by consensus".to_string(),
            ));
        }

        let campaign = draft.campaign_id.clone();
        let mut guard = self.inner.state.lock();
        if let Some(existing) = guard.records.get(&draft.id) {
            let outcome = SubmitOutcome {
                id: existing.id.clone(),
                state: existing.state,
                created: false,
            };
            drop(guard);
            debug!(
                transaction_id = %outcome.id,
                state = %outcome.state,
                "Duplicate submission absorbed"
            );
            return Ok(outcome);
        }

        let record = BridgeTransaction::from_draft(draft, unix_millis_now());
        let id = record.id.clone();
        guard.order.push(id.clone());
        guard.records.insert(id.clone(), record);
        drop(guard);

        info!(
            transaction_id = %id,
            campaign = %campaign,
            "Transaction staged for admin approval"
        );
        Ok(SubmitOutcome {
            id,
            state: TransactionState::PendingAdminApproval,
            created: true,
        })
    }

    /// Record an administrator's decision on a pending transaction.
    ///
    /// Checks run in a fixed order: signer authorization, record existence,
    /// pending state, signature. The signature must cover the signer's
    /// current nonce; on success the nonce is consumed and the transition
    /// applied atomically, and an approval schedules the delayed execution
    /// task on the current Tokio runtime.
    pub fn decide(
        &self,
        id: &TransactionId,
        signer: &EthAddress,
        signature: &SignatureBytes,
        decision: Decision,
    ) -> Result<DecisionOutcome, LedgerError> {
        if !self.inner.admins.contains(signer) {
            warn!(
                transaction_id = %id,
                signer = %signer,
                "Decision from unauthorized signer rejected"
            );
            return Err(LedgerError::UnauthorizedSigner { signer: *signer });
        }

        let mut guard = self.inner.state.lock();

        let current = match guard.records.get(id) {
            None => return Err(LedgerError::NotFound { id: id.clone() }),
            Some(record) => record.state,
        };
        if !current.is_pending() {
            return Err(LedgerError::InvalidTransition {
                id: id.clone(),
                actual: current,
                required: TransactionState::PendingAdminApproval,
            });
        }

        let nonce = guard.nonces.current(signer);
        if let Err(reason) = self.inner.verifier.check(id, signer, nonce, signature) {
            drop(guard);
            warn!(
                transaction_id = %id,
                signer = %signer,
                nonce,
                %reason,
                "Signature verification failed; nonce not consumed"
            );
            return Err(LedgerError::InvalidSignature {
                id: id.clone(),
                signer: *signer,
            });
        }

        let next_nonce = guard.nonces.consume(signer);
        let next_state = match decision {
            Decision::Approve => TransactionState::AdminApproved,
            Decision::Reject => TransactionState::AdminRejected,
        };
        if let Some(record) = guard.records.get_mut(id) {
            record.state = next_state;
            record.admin_decision = Some(AdminDecision {
                signer_address: *signer,
                signature: *signature,
                decision,
            });
            record.decided_at = Some(unix_millis_now());
        }
        drop(guard);

        info!(
            transaction_id = %id,
            signer = %signer,
            decision = %decision,
            next_nonce,
            "Admin decision recorded"
        );

        if decision == Decision::Approve {
            self.schedule_auto_execute(id.clone());
        }

        Ok(DecisionOutcome {
            id: id.clone(),
            state: next_state,
            next_nonce,
        })
    }

    /// Execute an approved transaction.
    ///
    /// Settlement is dispatched without holding the ledger lock; the state
    /// is re-checked afterwards, so racing executors converge on a single
    /// `EXECUTED` record. Calling this on an already-executed record is a
    /// no-op reporting `already_executed`.
    pub async fn execute(&self, id: &TransactionId) -> Result<ExecutionOutcome, LedgerError> {
        let snapshot = {
            let guard = self.inner.state.lock();
            match guard.records.get(id) {
                None => return Err(LedgerError::NotFound { id: id.clone() }),
                Some(record) => match record.state {
                    TransactionState::Executed => {
                        return Ok(ExecutionOutcome {
                            id: id.clone(),
                            state: TransactionState::Executed,
                            already_executed: true,
                        })
                    }
                    TransactionState::AdminApproved => record.clone(),
                    other => {
                        return Err(LedgerError::InvalidTransition {
                            id: id.clone(),
                            actual: other,
                            required: TransactionState::AdminApproved,
                        })
                    }
                },
            }
        };

        if let Err(error) = self.inner.dispatcher.dispatch(&snapshot).await {
            warn!(
                transaction_id = %id,
                %error,
                "Settlement dispatch failed; transaction stays ADMIN_APPROVED"
            );
            return Err(LedgerError::DispatchFailed {
                id: id.clone(),
                reason: error.to_string(),
            });
        }

        let mut guard = self.inner.state.lock();
        let record = guard
            .records
            .get_mut(id)
            .ok_or_else(|| LedgerError::NotFound { id: id.clone() })?;
        if record.state == TransactionState::Executed {
            // A concurrent executor finished while we were dispatching.
            return Ok(ExecutionOutcome {
                id: id.clone(),
                state: TransactionState::Executed,
                already_executed: true,
            });
        }
        record.state = TransactionState::Executed;
        record.executed_at = Some(unix_millis_now());
        drop(guard);

        info!(transaction_id = %id, "Transaction executed");
        Ok(ExecutionOutcome {
            id: id.clone(),
            state: TransactionState::Executed,
            already_executed: false,
        })
    }

    /// All pending transactions, oldest submission first.
    #[must_use]
    pub fn list_pending(&self) -> Vec<BridgeTransaction> {
        let guard = self.inner.state.lock();
        guard
            .order
            .iter()
            .filter_map(|id| guard.records.get(id))
            .filter(|record| record.state.is_pending())
            .cloned()
            .collect()
    }

    /// Snapshot of a record.
    pub fn status(&self, id: &TransactionId) -> Result<BridgeTransaction, LedgerError> {
        self.inner
            .state
            .lock()
            .records
            .get(id)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound { id: id.clone() })
    }

    /// The nonce `signer` must use for their next signature. 0 if unseen.
    #[must_use]
    pub fn nonce_of(&self, signer: &EthAddress) -> u64 {
        self.inner.state.lock().nonces.current(signer)
    }

    /// Number of transactions awaiting a decision.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.inner
            .state
            .lock()
            .records
            .values()
            .filter(|record| record.state.is_pending())
            .count()
    }

    /// The configured administrator addresses, in a stable order.
    #[must_use]
    pub fn admins(&self) -> Vec<EthAddress> {
        self.inner.admins.members()
    }

    /// The configured approval-to-execution delay.
    #[must_use]
    pub fn auto_execute_delay(&self) -> Duration {
        self.inner.auto_execute_delay
    }

    /// Number of delayed execution tasks currently scheduled.
    #[must_use]
    pub fn scheduled_count(&self) -> usize {
        self.inner.scheduled.lock().len()
    }

    /// Abort every scheduled execution task. Called on shutdown; approved
    /// transactions stay `ADMIN_APPROVED` and can be executed manually.
    pub fn cancel_scheduled(&self) {
        let handles: Vec<(TransactionId, AbortHandle)> =
            self.inner.scheduled.lock().drain().collect();
        if handles.is_empty() {
            return;
        }
        let cancelled = handles.len();
        for (_, handle) in handles {
            handle.abort();
        }
        info!(cancelled, "Cancelled scheduled auto-executions");
    }

    fn schedule_auto_execute(&self, id: TransactionId) {
        let ledger = self.clone();
        let delay = self.inner.auto_execute_delay;
        let task_id = id.clone();

        // Holding the map lock across the spawn orders the insert before the
        // task's own cleanup, even if the delay is zero.
        let mut scheduled = self.inner.scheduled.lock();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match ledger.execute(&task_id).await {
                Ok(outcome) if outcome.already_executed => {
                    debug!(
                        transaction_id = %task_id,
                        "Auto-execution skipped; already executed"
                    );
                }
                Ok(_) => {
                    info!(transaction_id = %task_id, "Auto-execution completed");
                }
                Err(error) => {
                    warn!(transaction_id = %task_id, %error, "Auto-execution failed");
                }
            }
            ledger.inner.scheduled.lock().remove(&task_id);
        });
        debug!(
            transaction_id = %id,
            delay_ms = delay.as_millis() as u64,
            "Auto-execution scheduled"
        );
        if let Some(previous) = scheduled.insert(id, handle.abort_handle()) {
            previous.abort();
        }
    }
}
