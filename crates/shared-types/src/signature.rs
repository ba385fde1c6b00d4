//! # Recoverable Signature Bytes
//!
//! The 65-byte `r ‖ s ‖ v` signature form produced by wallet `personal_sign`.
//! Parsing only checks shape (length and hex); cryptographic validity is the
//! verifier's concern, so a well-formed-but-bogus signature still parses and
//! later fails verification rather than erroring at the transport edge.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing a signature string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureParseError {
    /// Missing the `0x` prefix.
    #[error("signature must start with 0x")]
    MissingPrefix,

    /// Wrong number of hex characters (expected 130).
    #[error("signature must be 65 bytes (130 hex chars), got {0}")]
    InvalidLength(usize),

    /// Non-hex characters in the body.
    #[error("signature contains invalid hex")]
    InvalidHex,
}

/// A 65-byte recoverable ECDSA signature: `r` (32) ‖ `s` (32) ‖ `v` (1).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SignatureBytes([u8; 65]);

impl SignatureBytes {
    /// Wrap raw signature bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 65]) -> Self {
        Self(bytes)
    }

    /// The raw 65 bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    /// The `r` component (first 32 bytes).
    #[must_use]
    pub fn r(&self) -> [u8; 32] {
        let mut r = [0u8; 32];
        r.copy_from_slice(&self.0[0..32]);
        r
    }

    /// The `s` component (second 32 bytes).
    #[must_use]
    pub fn s(&self) -> [u8; 32] {
        let mut s = [0u8; 32];
        s.copy_from_slice(&self.0[32..64]);
        s
    }

    /// The recovery byte `v` (last byte; wallets emit 27/28, raw ids 0/1).
    #[must_use]
    pub const fn v(&self) -> u8 {
        self.0[64]
    }

    /// Lower-case `0x`-prefixed hex form.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for SignatureBytes {
    type Err = SignatureParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or(SignatureParseError::MissingPrefix)?;

        if body.len() != 130 {
            return Err(SignatureParseError::InvalidLength(body.len()));
        }

        let mut bytes = [0u8; 65];
        hex::decode_to_slice(body, &mut bytes).map_err(|_| SignatureParseError::InvalidHex)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for SignatureBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for SignatureBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Full signatures are noisy in logs; show the ends only.
        let h = hex::encode(self.0);
        write!(f, "SignatureBytes(0x{}..{})", &h[..8], &h[h.len() - 8..])
    }
}

impl From<[u8; 65]> for SignatureBytes {
    fn from(bytes: [u8; 65]) -> Self {
        Self(bytes)
    }
}

impl Serialize for SignatureBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SignatureBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(DeError::custom)
    }
}
