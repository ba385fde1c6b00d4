//! # Signing Convention Flows
//!
//! Verifies that a wallet following the documented signing convention — the
//! tagged keccak digest wrapped in the `personal_sign` prefix — produces
//! signatures the verifier (ab-01) and the ledger (ab-02) accept. These
//! tests rebuild the digest from raw bytes, independent of the helpers the
//! production code uses.

#[cfg(test)]
mod tests {
    use crate::support::{address_of, sign_approval, signing_key};
    use ab_01_signature_verification::{
        approval_digest, invert_s, personal_message_hash, recover_signer, ApprovalVerifier,
        SignatureError, APPROVAL_DOMAIN_TAG,
    };
    use shared_types::{SignatureBytes, TransactionId};
    use sha3::{Digest, Keccak256};

    /// Digest rebuilt from first principles: keccak256 of tag bytes, the
    /// transaction id as UTF-8, the 20 address bytes, and the nonce as a
    /// 32-byte big-endian integer.
    fn manual_digest(tx_id: &str, signer: &[u8; 20], nonce: u64) -> [u8; 32] {
        let mut nonce_be = [0u8; 32];
        nonce_be[24..].copy_from_slice(&nonce.to_be_bytes());

        let mut hasher = Keccak256::new();
        hasher.update(APPROVAL_DOMAIN_TAG.as_bytes());
        hasher.update(tx_id.as_bytes());
        hasher.update(signer);
        hasher.update(nonce_be);
        hasher.finalize().into()
    }

    #[test]
    fn test_digest_matches_manual_construction() {
        let key = signing_key(0x42);
        let signer = address_of(&key);
        let tx_id = TransactionId::from("0xclick");

        assert_eq!(
            approval_digest(&tx_id, &signer, 7),
            manual_digest("0xclick", signer.as_bytes(), 7)
        );
    }

    #[test]
    fn test_personal_prefix_matches_manual_construction() {
        let inner = [0xabu8; 32];
        let mut hasher = Keccak256::new();
        hasher.update(b"\x19Ethereum Signed Message:\n32");
        hasher.update(inner);
        let expected: [u8; 32] = hasher.finalize().into();

        assert_eq!(personal_message_hash(&inner), expected);
    }

    #[test]
    fn test_wallet_signature_recovers_to_wallet() {
        let key = signing_key(0x42);
        let signer = address_of(&key);
        let signature = sign_approval(&key, "0xclick", 0);

        // Both v encodings wallets emit are accepted.
        assert!(signature.v() == 27 || signature.v() == 28);

        let prehash =
            personal_message_hash(&approval_digest(&TransactionId::from("0xclick"), &signer, 0));
        assert_eq!(recover_signer(&prehash, &signature).unwrap(), signer);

        // Raw recovery id form of the same signature.
        let mut raw = *signature.as_bytes();
        raw[64] -= 27;
        assert_eq!(
            recover_signer(&prehash, &SignatureBytes::new(raw)).unwrap(),
            signer
        );
    }

    #[test]
    fn test_high_s_malleated_signature_rejected() {
        let key = signing_key(0x42);
        let signer = address_of(&key);
        let signature = sign_approval(&key, "0xclick", 0);

        // Flip s to its high-order twin and adjust v; the malleated twin is
        // a valid ECDSA signature but violates the low-s rule.
        let mut malleated = *signature.as_bytes();
        let high_s = invert_s(&signature.s());
        malleated[32..64].copy_from_slice(&high_s);
        malleated[64] = if signature.v() == 27 { 28 } else { 27 };

        let verifier = ApprovalVerifier::new();
        let tx_id = TransactionId::from("0xclick");
        assert!(verifier.verify(&tx_id, &signer, 0, &signature));
        assert!(matches!(
            verifier.check(&tx_id, &signer, 0, &SignatureBytes::new(malleated)),
            Err(SignatureError::MalleableSignature)
        ));
    }

    #[test]
    fn test_hex_round_trip_preserves_validity() {
        let key = signing_key(0x42);
        let signer = address_of(&key);
        let signature = sign_approval(&key, "0xclick", 3);

        // The signature survives the wire form the dashboard sends.
        let wire = signature.to_hex();
        let parsed: SignatureBytes = wire.parse().unwrap();
        assert!(ApprovalVerifier::new().verify(
            &TransactionId::from("0xclick"),
            &signer,
            3,
            &parsed
        ));
    }

    #[test]
    fn test_digest_binds_every_field() {
        let key = signing_key(0x42);
        let signer = address_of(&key);
        let verifier = ApprovalVerifier::new();
        let signature = sign_approval(&key, "0xclick", 0);

        // Any change to the signed tuple invalidates the signature.
        assert!(verifier.verify(&TransactionId::from("0xclick"), &signer, 0, &signature));
        assert!(!verifier.verify(&TransactionId::from("0xother"), &signer, 0, &signature));
        assert!(!verifier.verify(&TransactionId::from("0xclick"), &signer, 1, &signature));
        let other = address_of(&signing_key(0x43));
        assert!(!verifier.verify(&TransactionId::from("0xclick"), &other, 0, &signature));
    }
}
