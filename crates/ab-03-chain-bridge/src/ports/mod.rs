//! # Ports Module
//!
//! The consensus source boundary.

pub mod outbound;

pub use outbound::*;
