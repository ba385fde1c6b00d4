//! Domain layer: configuration, the error envelope, and wire DTOs.

pub mod config;
pub mod dto;
pub mod error;
