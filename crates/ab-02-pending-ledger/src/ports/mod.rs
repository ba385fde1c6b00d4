//! # Ports Module
//!
//! Boundary traits between the ledger and the outside world.

pub mod outbound;

pub use outbound::*;
