//! # Adapters Module
//!
//! Concrete consensus sources.

pub mod feed;

pub use feed::InMemoryConsensusFeed;
