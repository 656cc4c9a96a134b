//! Property-based tests for account derivation and signature encoding.

use acct_crypto_secp256k1::{derive_account, Secp256k1Keypair, Signature};
use proptest::prelude::*;

fn seed_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 64)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: r and s are always 64 hex characters each, whatever their
    /// magnitude, and v follows without padding.
    #[test]
    fn prop_encoding_width(
        r in prop::collection::vec(any::<u8>(), 0..=32),
        s in prop::collection::vec(any::<u8>(), 0..=32),
        v in any::<u64>(),
    ) {
        let signature = Signature::from_parts(&r, &s, v).unwrap();
        let encoded = signature.encode();

        prop_assert!(encoded.starts_with("0x"));
        let v_hex = format!("{:x}", v);
        prop_assert_eq!(encoded.len(), 2 + 64 + 64 + v_hex.len());
        prop_assert_eq!(&encoded[130..], v_hex.as_str());
        prop_assert_eq!(Signature::decode(&encoded).unwrap(), signature);
    }

    /// Property: deriving from the same seed twice gives the same account.
    #[test]
    fn prop_derivation_deterministic(seed in seed_strategy()) {
        let first = derive_account(&seed).unwrap();
        let second = derive_account(&seed).unwrap();

        prop_assert_eq!(&first.address, &second.address);
        prop_assert_eq!(first.private_key.as_str(), second.private_key.as_str());
    }

    /// Property: the derived private key reproduces the derived address.
    #[test]
    fn prop_private_key_matches_address(seed in seed_strategy()) {
        let account = derive_account(&seed).unwrap();
        let keypair = Secp256k1Keypair::from_private_key_hex(&account.private_key).unwrap();

        prop_assert_eq!(keypair.address(), account.address);
    }

    /// Property: signatures always recover to the signer and encode to
    /// 132 characters.
    #[test]
    fn prop_sign_recover(seed in seed_strategy(), hash in prop::array::uniform32(any::<u8>())) {
        let keypair = Secp256k1Keypair::from_seed(&seed).unwrap();
        let signature = keypair.sign_hash(&hash).unwrap();

        prop_assert_eq!(signature.encode().len(), 132);
        prop_assert_eq!(signature.recover_address(&hash).unwrap(), keypair.address_bytes());
    }

    /// Property: seeds of the wrong length are always rejected.
    #[test]
    fn prop_wrong_seed_length_rejected(len in (0usize..128).prop_filter("not 64", |l| *l != 64)) {
        let seed = vec![0x5a; len];
        prop_assert!(derive_account(&seed).is_err());
    }
}
