//! # Approval Bridge Runtime
//!
//! Library half of the runtime binary: configuration loading lives here so
//! it can be exercised by tests without spawning a process.

pub mod config;

pub use config::{BridgeConfig, RuntimeConfigError};
