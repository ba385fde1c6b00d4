//! # Chain Event Bridge (AB-03)
//!
//! Subscribes to the consensus contract's "quorum reached" notifications and
//! stages approved transactions in the pending ledger, through the same
//! intake operation the HTTP API uses.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Notification and on-chain detail shapes,
//!   plus the normalization into a ledger draft
//! - **Ports Layer** (`ports/`): The consensus source abstraction
//! - **Adapters Layer** (`adapters/`): The in-memory broadcast feed
//! - **Service Layer** (`service.rs`): The subscription loop
//!
//! ## Resilience
//!
//! The loop never dies on bad input: consensus-rejected notifications are
//! logged and skipped, a failed detail fetch skips that event only, and
//! duplicate delivery is absorbed by the ledger's idempotent submit. Only a
//! shutdown signal or a closed stream stops it.

pub mod adapters;
pub mod domain;
pub mod ports;

mod service;

/// Default broadcast capacity for the in-memory feed.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

// Re-export public API
pub use adapters::InMemoryConsensusFeed;
pub use domain::{QuorumNotification, RawTransactionDetails, UpstreamError};
pub use ports::{ConsensusEventSource, QuorumStream};
pub use service::ChainEventBridge;
