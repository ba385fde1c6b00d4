//! # Shared Types Crate
//!
//! This crate contains the vocabulary types shared across the bridge
//! subsystems: Ethereum-style addresses, opaque transaction identifiers,
//! 65-byte recoverable signatures, and timestamp helpers.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Normalized at the edge**: Addresses parse once into 20 raw bytes, so
//!   case-insensitive comparison is plain byte equality everywhere else.
//! - **Wallet-compatible wire forms**: Addresses and signatures serialize as
//!   `0x`-prefixed hex strings, the form browser wallets produce.

pub mod address;
pub mod ids;
pub mod signature;
pub mod time;

pub use address::{AddressParseError, EthAddress};
pub use ids::TransactionId;
pub use signature::{SignatureBytes, SignatureParseError};
pub use time::{unix_millis_now, UnixMillis};
