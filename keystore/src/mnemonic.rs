// Copyright (c) 2024 The Botho Foundation

//! BIP-39 mnemonic handling
//!
//! Thin wrapper over `tiny-bip39` using the English wordlist and no
//! passphrase extension.

use bip39::{Language, Mnemonic, Seed};
use zeroize::Zeroizing;

use crate::entropy::MIXED_ENTROPY_BYTES;
use crate::error::{KeystoreError, Result};

/// Length of the seed produced by [`to_seed`]
pub const SEED_BYTES: usize = 64;

/// Words produced from [`MIXED_ENTROPY_BYTES`] of entropy
pub const GENERATED_WORDS: usize = 12;

/// Generate a 12-word mnemonic from 16 bytes of entropy.
///
/// Deterministic: the same entropy always yields the same phrase.
pub fn generate(entropy: &[u8; MIXED_ENTROPY_BYTES]) -> Result<Zeroizing<String>> {
    let mnemonic = Mnemonic::from_entropy(entropy, Language::English)
        .map_err(|e| KeystoreError::InvalidMnemonic(e.to_string()))?;

    Ok(Zeroizing::new(mnemonic.phrase().to_string()))
}

/// Check a phrase's words and checksum.
pub fn validate(phrase: &str) -> bool {
    Mnemonic::validate(phrase, Language::English).is_ok()
}

/// Stretch a mnemonic into a 64-byte seed (PBKDF2-HMAC-SHA512, empty
/// passphrase).
pub fn to_seed(phrase: &str) -> Result<Zeroizing<[u8; SEED_BYTES]>> {
    let mnemonic = Mnemonic::from_phrase(phrase, Language::English)
        .map_err(|e| KeystoreError::InvalidMnemonic(e.to_string()))?;

    let seed = Seed::new(&mnemonic, "");
    let mut out = Zeroizing::new([0u8; SEED_BYTES]);
    out.copy_from_slice(seed.as_bytes());
    Ok(out)
}

/// Number of whitespace-separated words in a phrase
pub fn word_count(phrase: &str) -> usize {
    phrase.split_whitespace().count()
}
