//! # Domain Module
//!
//! Shapes of the consensus contract's notifications and reads, and the
//! normalization into ledger drafts.

pub mod errors;
pub mod events;

pub use errors::*;
pub use events::*;
