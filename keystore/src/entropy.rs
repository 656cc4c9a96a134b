// Copyright (c) 2024 The Botho Foundation

//! Entropy mixing for mnemonic generation
//!
//! Caller-supplied entropy is never trusted on its own: it is always hashed
//! together with fresh bytes from a cryptographically secure source.

use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Bytes drawn from the local random source per mix
pub const LOCAL_ENTROPY_BYTES: usize = 32;

/// Bytes of mixed output, enough for a 12-word mnemonic
pub const MIXED_ENTROPY_BYTES: usize = 16;

/// Mix caller entropy with local randomness into 16 bytes.
///
/// Computes `SHA-256(caller_entropy || hex(random_32_bytes))` and keeps the
/// first 16 bytes. Empty caller entropy is accepted; the local draw alone
/// still carries 256 bits.
pub fn mix_entropy<R: RngCore + CryptoRng>(
    caller_entropy: &str,
    rng: &mut R,
) -> Zeroizing<[u8; MIXED_ENTROPY_BYTES]> {
    let mut local = Zeroizing::new([0u8; LOCAL_ENTROPY_BYTES]);
    rng.fill_bytes(&mut local[..]);
    let local_hex = Zeroizing::new(hex::encode(&local[..]));

    let mut hasher = Sha256::new();
    hasher.update(caller_entropy.as_bytes());
    hasher.update(local_hex.as_bytes());
    let digest = hasher.finalize();

    let mut mixed = Zeroizing::new([0u8; MIXED_ENTROPY_BYTES]);
    mixed.copy_from_slice(&digest[..MIXED_ENTROPY_BYTES]);
    mixed
}
