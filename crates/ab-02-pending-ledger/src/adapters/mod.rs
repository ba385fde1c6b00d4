//! # Adapters Module
//!
//! Concrete implementations of the outbound ports.

pub mod dispatcher;

pub use dispatcher::LoggingDispatcher;
