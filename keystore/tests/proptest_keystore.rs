//! Property-based tests for the keystore pipeline.
//!
//! Encryption runs Argon2id on every case, so the vault properties use a
//! small case count.

use acct_crypto_secp256k1::derive_account;
use acct_keystore::{mix_entropy, mnemonic, vault, Keystore};
use proptest::prelude::*;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: generate -> to_seed -> derive is a pure function of the
    /// entropy bytes.
    #[test]
    fn prop_entropy_to_account_deterministic(entropy in prop::array::uniform16(any::<u8>())) {
        let derive = |entropy: &[u8; 16]| {
            let phrase = mnemonic::generate(entropy).unwrap();
            let seed = mnemonic::to_seed(&phrase).unwrap();
            derive_account(&seed[..]).unwrap()
        };

        let first = derive(&entropy);
        let second = derive(&entropy);

        prop_assert_eq!(&first.address, &second.address);
        prop_assert_eq!(first.private_key.as_str(), second.private_key.as_str());
    }

    /// Property: every generated mnemonic passes validation.
    #[test]
    fn prop_generated_mnemonic_valid(entropy in prop::array::uniform16(any::<u8>())) {
        let phrase = mnemonic::generate(&entropy).unwrap();
        prop_assert!(mnemonic::validate(&phrase));
        prop_assert_eq!(mnemonic::word_count(&phrase), 12);
    }

    /// Property: the mixer is a function of caller entropy and the random
    /// draw only.
    #[test]
    fn prop_mixer_deterministic_under_seeded_rng(caller in ".*", seed in any::<u64>()) {
        let first = mix_entropy(&caller, &mut ChaCha20Rng::seed_from_u64(seed));
        let second = mix_entropy(&caller, &mut ChaCha20Rng::seed_from_u64(seed));
        prop_assert_eq!(*first, *second);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(4))]

    /// Property: decrypt(encrypt(p, pw), pw) == p.
    #[test]
    fn prop_vault_roundtrip(plaintext in ".{1,64}", password in ".{1,32}") {
        let blob = vault::encrypt(&plaintext, &password).unwrap();
        let decrypted = vault::decrypt(&blob, &password).unwrap();
        prop_assert_eq!(decrypted.as_str(), plaintext.as_str());
    }

    /// Property: serialize/restore preserves both secrets.
    #[test]
    fn prop_serialization_roundtrip(entropy in ".*", seed in any::<u64>()) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let keystore = Keystore::initialize_with_rng(&entropy, "pw", &mut rng).unwrap();
        let restored = Keystore::from_serialized(&keystore.serialize().unwrap()).unwrap();

        let private_key = keystore.get_private_key("pw").unwrap();
        let restored_private_key = restored.get_private_key("pw").unwrap();
        prop_assert_eq!(restored_private_key.as_str(), private_key.as_str());

        let phrase = keystore.get_mnemonic("pw").unwrap();
        let restored_phrase = restored.get_mnemonic("pw").unwrap();
        prop_assert_eq!(restored_phrase.as_str(), phrase.as_str());
        prop_assert_eq!(restored.address(), keystore.address());
    }
}
