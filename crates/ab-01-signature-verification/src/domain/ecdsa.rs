//! # ECDSA Recovery (secp256k1)
//!
//! Pure domain logic for recovering an administrator address from a 65-byte
//! recoverable signature.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: S must be STRICTLY LESS THAN the
//!   half curve order
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **Constant-Time Operations**: Uses `subtle` for side-channel resistance
//! - Uses the k256 crate for curve operations

use super::errors::SignatureError;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use shared_types::{EthAddress, SignatureBytes};
use subtle::{Choice, ConstantTimeEq};

use super::digest::keccak256;

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Half of the secp256k1 curve order (for the malleability check).
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Recover the signer address from a signature over a prehashed message.
///
/// Validations performed before recovery:
/// 1. R is in valid range [1, n-1] per the SEC1 standard
/// 2. S is in valid range [1, n-1]
/// 3. S is in the lower half per EIP-2 malleability protection
/// 4. Recovery byte v is one of 0, 1, 27, 28
pub fn recover_signer(
    prehash: &[u8; 32],
    signature: &SignatureBytes,
) -> Result<EthAddress, SignatureError> {
    let r = signature.r();
    let s = signature.s();

    if !is_valid_scalar(&r) || !is_valid_scalar(&s) {
        return Err(SignatureError::ScalarOutOfRange);
    }

    // Malleability (EIP-2): S must be in the lower half of the curve order.
    if !is_low_s(&s) {
        return Err(SignatureError::MalleableSignature);
    }

    let recovery_id = parse_recovery_id(signature.v())?;

    let sig = Signature::from_slice(&signature.as_bytes()[..64])
        .map_err(|_| SignatureError::InvalidFormat)?;

    let recovered_key = VerifyingKey::recover_from_prehash(prehash, &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    Ok(address_from_verifying_key(&recovered_key))
}

/// Derive the Ethereum-style address from a public key: the last 20 bytes of
/// `keccak256(uncompressed pubkey without the 0x04 prefix)`.
#[must_use]
pub fn address_from_verifying_key(public_key: &VerifyingKey) -> EthAddress {
    let encoded = public_key.to_encoded_point(false);
    let hash = keccak256(&encoded.as_bytes()[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    EthAddress::new(address)
}

/// Check that S is in the lower half of the curve order (strict inequality).
///
/// Constant-time: the comparison runs in fixed time regardless of input, so
/// timing cannot leak information about the signature.
fn is_low_s(s: &[u8; 32]) -> bool {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let s_byte = s[i];
        let h_byte = SECP256K1_HALF_ORDER[i];

        let not_decided = !(less | greater);
        let byte_less = Choice::from(u8::from(s_byte < h_byte));
        let byte_greater = Choice::from(u8::from(s_byte > h_byte));

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    less.into()
}

/// Check that a scalar is in the valid range [1, n-1], constant-time.
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let s_byte = scalar[i];
        let n_byte = SECP256K1_ORDER[i];

        let not_decided = !(less | greater);
        let byte_less = Choice::from(u8::from(s_byte < n_byte));
        let byte_greater = Choice::from(u8::from(s_byte > n_byte));

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    let valid = !is_zero & less;
    valid.into()
}

/// Parse the recovery byte. Wallets emit 27/28; raw recovery ids are 0/1.
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(SignatureError::InvalidRecoveryId(v)),
    };

    RecoveryId::try_from(id).map_err(|_| SignatureError::InvalidRecoveryId(v))
}

/// Invert S across the curve order: s' = n - s. Malleability testing helper.
#[must_use]
pub fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;

    for i in (0..32).rev() {
        let diff = i32::from(SECP256K1_ORDER[i]) - i32::from(s[i]) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }

    result
}

// =============================================================================
// TEST HELPERS
// =============================================================================


// =============================================================================
// UNIT TESTS
// =============================================================================
