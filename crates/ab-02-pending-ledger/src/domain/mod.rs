//! # Domain Module
//!
//! Core domain types for the pending-approval ledger.

pub mod admins;
pub mod config;
pub mod entities;
pub mod errors;
pub mod nonce;
pub mod state;

pub use admins::*;
pub use config::*;
pub use entities::*;
pub use errors::*;
pub use nonce::*;
pub use state::*;
