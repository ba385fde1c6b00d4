//! # Pending-Approval Ledger (AB-02)
//!
//! The authoritative store for transactions awaiting human authorization.
//! Consensus reports that a quorum approved a click-fraud verification, but
//! nothing settles until an administrator signs off; this crate holds each
//! transaction between those two moments and drives its lifecycle.
//!
//! ```text
//! PENDING_ADMIN_APPROVAL ──approve──> ADMIN_APPROVED ──execute──> EXECUTED
//!           │
//!           └────────────reject─────> ADMIN_REJECTED
//! ```
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Records, lifecycle states, nonce counters,
//!   the administrator set, configuration
//! - **Ports Layer** (`ports/`): The outbound settlement dispatch trait
//! - **Adapters Layer** (`adapters/`): The default log-only dispatcher
//! - **Service Layer** (`service.rs`): [`ApprovalLedger`], the single locked
//!   entry point every caller shares
//!
//! ## Guarantees
//!
//! - Signature verification, nonce consumption, and the state transition of a
//!   decision form one atomic unit under the ledger lock.
//! - Re-submitting a known transaction id never overwrites the record.
//! - Scheduled auto-executions hold abortable handles, so shutdown cancels
//!   them deterministically instead of leaking timers.

pub mod adapters;
pub mod domain;
pub mod ports;

mod service;

// Re-export public API
pub use adapters::LoggingDispatcher;
pub use domain::{
    AdminDecision, AdminRegistry, BridgeTransaction, ConfigError, ConsensusEvidence, Decision,
    LedgerConfig, LedgerError, NonceRegistry, TransactionDraft, TransactionState,
    ZERO_METADATA_HASH,
};
pub use ports::{DispatchError, ExecutionDispatcher, MockDispatcher};
pub use service::{ApprovalLedger, DecisionOutcome, ExecutionOutcome, SubmitOutcome};
