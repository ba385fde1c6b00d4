//! # Outbound Ports
//!
//! The settlement boundary. Execution marks a record `EXECUTED` only after
//! the dispatcher acknowledged it, so the trait sits between the state
//! machine and whatever actually settles the transaction.

use crate::domain::entities::BridgeTransaction;
use async_trait::async_trait;
use shared_types::TransactionId;
use std::sync::Arc;
use thiserror::Error;

/// Why a dispatch attempt failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The settlement target could not be reached.
    #[error("settlement target unavailable: {0}")]
    Unavailable(String),

    /// The settlement target rejected the transaction.
    #[error("settlement target refused: {0}")]
    Refused(String),
}

/// Settlement dispatch — outbound port.
///
/// Implementations must be safe to call concurrently and must not assume
/// exactly-once delivery; the ledger re-checks state after the call and a
/// failed dispatch leaves the record `ADMIN_APPROVED` for retry.
#[async_trait]
pub trait ExecutionDispatcher: Send + Sync {
    /// Hand the approved transaction to the settlement target.
    async fn dispatch(&self, record: &BridgeTransaction) -> Result<(), DispatchError>;
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

/// Recording dispatcher for tests: remembers every dispatched id and can be
/// told to fail the next calls.
#[derive(Clone, Default)]
pub struct MockDispatcher {
    dispatched: Arc<parking_lot::Mutex<Vec<TransactionId>>>,
    failure: Arc<parking_lot::Mutex<Option<DispatchError>>>,
}

impl MockDispatcher {
    /// A dispatcher that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent dispatches fail with `error` until cleared.
    pub fn fail_with(&self, error: DispatchError) {
        *self.failure.lock() = Some(error);
    }

    /// Let subsequent dispatches succeed again.
    pub fn clear_failure(&self) {
        *self.failure.lock() = None;
    }

    /// Ids dispatched so far, in call order.
    #[must_use]
    pub fn dispatched(&self) -> Vec<TransactionId> {
        self.dispatched.lock().clone()
    }

    /// Number of successful dispatches.
    #[must_use]
    pub fn dispatch_count(&self) -> usize {
        self.dispatched.lock().len()
    }
}

#[async_trait]
impl ExecutionDispatcher for MockDispatcher {
    async fn dispatch(&self, record: &BridgeTransaction) -> Result<(), DispatchError> {
        if let Some(error) = self.failure.lock().clone() {
            return Err(error);
        }
        self.dispatched.lock().push(record.id.clone());
        Ok(())
    }
}
