// Copyright (c) 2024 The Botho Foundation

#![deny(unsafe_code)]

//! Secp256k1 account derivation for Ethereum-compatible keystores.
//!
//! This crate turns a 64-byte BIP-39 seed into a single account key at the
//! fixed BIP-44 path `m/44'/60'/0'/0/0`, renders its address, and signs raw
//! 32-byte digests into the 65-byte `(r, s, v)` form consumed by
//! transaction-signing protocols.
//!
//! # Examples
//!
//! ```
//! use acct_crypto_secp256k1::Secp256k1Keypair;
//!
//! let keypair = Secp256k1Keypair::from_seed(&[7u8; 64]).unwrap();
//!
//! let address = keypair.address();
//! assert!(address.starts_with("0x"));
//! assert_eq!(address.len(), 42);
//!
//! let signature = keypair.sign_hash(&[0x11; 32]).unwrap();
//! assert_eq!(signature.encode().len(), 132);
//! ```

pub mod signature;

pub use signature::Signature;

use bip32::{ChildNumber, XPrv};
use k256::ecdsa::SigningKey;
use sha3::{Digest, Keccak256};
use zeroize::Zeroizing;

/// Errors that can occur during key operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid seed length: expected 64 bytes, got {0}")]
    InvalidSeedLength(usize),

    #[error("Key derivation failed: {0}")]
    DerivationError(String),

    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Signing failed: {0}")]
    SigningError(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
}

/// Length of a BIP-39 seed.
pub const SEED_LENGTH: usize = 64;

/// BIP-44 path `m/44'/60'/0'/0/0` as `(index, hardened)` components.
pub const DERIVATION_PATH: [(u32, bool); 5] = [
    (44, true), // purpose
    (60, true), // coin type
    (0, true),  // account
    (0, false), // change
    (0, false), // address index
];

/// Prefix shared by addresses and private key strings.
const HEX_PREFIX: &str = "0x";

/// The account produced by deriving a seed along [`DERIVATION_PATH`].
pub struct DerivedAccount {
    /// Lowercase `0x`-prefixed 20-byte address.
    pub address: String,
    /// Lowercase `0x`-prefixed 32-byte private key scalar.
    pub private_key: Zeroizing<String>,
}

impl core::fmt::Debug for DerivedAccount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DerivedAccount")
            .field("address", &self.address)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Derive the account address and private key from a 64-byte seed.
pub fn derive_account(seed: &[u8]) -> Result<DerivedAccount, Error> {
    let keypair = Secp256k1Keypair::from_seed(seed)?;
    Ok(DerivedAccount {
        address: keypair.address(),
        private_key: keypair.private_key_hex(),
    })
}

/// A secp256k1 keypair for Ethereum-compatible operations.
#[derive(Clone)]
pub struct Secp256k1Keypair {
    // SigningKey zeroizes its scalar on drop.
    signing_key: SigningKey,
}

impl core::fmt::Debug for Secp256k1Keypair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Secp256k1Keypair {{ address: {} }}", self.address())
    }
}

impl Secp256k1Keypair {
    /// Create a keypair from a 64-byte BIP-39 seed.
    ///
    /// Walks the fixed path `m/44'/60'/0'/0/0`; the same seed always yields
    /// the same key.
    pub fn from_seed(seed: &[u8]) -> Result<Self, Error> {
        if seed.len() != SEED_LENGTH {
            return Err(Error::InvalidSeedLength(seed.len()));
        }

        let mut xprv = XPrv::new(seed).map_err(|e| Error::DerivationError(e.to_string()))?;

        for &(index, hardened) in &DERIVATION_PATH {
            let child = ChildNumber::new(index, hardened)
                .map_err(|e| Error::DerivationError(e.to_string()))?;
            xprv = xprv
                .derive_child(child)
                .map_err(|e| Error::DerivationError(e.to_string()))?;
        }

        Ok(Self {
            signing_key: xprv.private_key().clone(),
        })
    }

    /// Create a keypair from raw 32-byte private key bytes.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, Error> {
        let signing_key =
            SigningKey::from_bytes(bytes.into()).map_err(|_| Error::InvalidPrivateKey)?;

        Ok(Self { signing_key })
    }

    /// Create a keypair from a hex private key, with or without `0x`.
    pub fn from_private_key_hex(private_key: &str) -> Result<Self, Error> {
        let digits = strip_hex_prefix(private_key);
        if digits.len() != 64 {
            return Err(Error::InvalidPrivateKey);
        }

        let mut bytes = Zeroizing::new([0u8; 32]);
        hex::decode_to_slice(digits, &mut bytes[..]).map_err(|_| Error::InvalidPrivateKey)?;
        Self::from_bytes(&bytes)
    }

    /// Get the public key as uncompressed bytes (65 bytes: 0x04 || x || y).
    pub fn public_key_uncompressed(&self) -> [u8; 65] {
        let point = self.signing_key.verifying_key().to_encoded_point(false);
        let mut result = [0u8; 65];
        result.copy_from_slice(point.as_bytes());
        result
    }

    /// Get the public key as compressed bytes (33 bytes: 0x02/0x03 || x).
    pub fn public_key_compressed(&self) -> [u8; 33] {
        let point = self.signing_key.verifying_key().to_encoded_point(true);
        let mut result = [0u8; 33];
        result.copy_from_slice(point.as_bytes());
        result
    }

    /// Get the raw 20-byte address.
    pub fn address_bytes(&self) -> [u8; 20] {
        address_from_public_key(&self.public_key_uncompressed())
    }

    /// Get the address as lowercase hex prefixed with "0x".
    pub fn address(&self) -> String {
        format!("{}{}", HEX_PREFIX, hex::encode(self.address_bytes()))
    }

    /// Get the EIP-55 checksummed address.
    pub fn checksum_address(&self) -> String {
        checksum_encode(&self.address_bytes())
    }

    /// Get the private key scalar as lowercase hex prefixed with "0x".
    pub fn private_key_hex(&self) -> Zeroizing<String> {
        let bytes: Zeroizing<[u8; 32]> = Zeroizing::new(self.signing_key.to_bytes().into());
        let mut out = Zeroizing::new(String::with_capacity(66));
        out.push_str(HEX_PREFIX);
        out.push_str(&hex::encode(bytes.as_slice()));
        out
    }

    /// Sign a raw 32-byte digest.
    ///
    /// The caller hashes the message; this signs the digest as-is. `v` is the
    /// recovery id plus 27.
    pub fn sign_hash(&self, hash: &[u8; 32]) -> Result<Signature, Error> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(hash)
            .map_err(|e| Error::SigningError(e.to_string()))?;

        let bytes = signature.to_bytes();
        Signature::from_parts(
            &bytes[..32],
            &bytes[32..],
            u64::from(recovery_id.to_byte()) + 27,
        )
    }
}

/// Compute the address for an uncompressed public key.
///
/// The address is the last 20 bytes of keccak256(x || y); the leading 0x04
/// tag is not hashed.
pub fn address_from_public_key(public_key: &[u8; 65]) -> [u8; 20] {
    let hash = Keccak256::digest(&public_key[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..32]);
    address
}

/// EIP-55 checksum encode an address.
pub fn checksum_encode(address: &[u8; 20]) -> String {
    let hex_addr = hex::encode(address);
    let hash = Keccak256::digest(hex_addr.as_bytes());

    let mut result = String::with_capacity(42);
    result.push_str(HEX_PREFIX);

    for (i, c) in hex_addr.chars().enumerate() {
        if c.is_ascii_digit() {
            result.push(c);
            continue;
        }

        let hash_byte = hash[i / 2];
        let hash_nibble = if i % 2 == 0 {
            hash_byte >> 4
        } else {
            hash_byte & 0x0f
        };

        if hash_nibble >= 8 {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
    }

    result
}

/// Strip a leading "0x" or "0X", if present.
pub fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bip39::{Language, Mnemonic, Seed};

    // Standard test mnemonic (DO NOT USE IN PRODUCTION)
    const TEST_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn test_seed() -> Vec<u8> {
        let mnemonic = Mnemonic::from_phrase(TEST_MNEMONIC, Language::English).unwrap();
        Seed::new(&mnemonic, "").as_bytes().to_vec()
    }

    #[test]
    fn test_seed_derivation() {
        let keypair = Secp256k1Keypair::from_seed(&test_seed()).unwrap();

        // Known address for the test mnemonic at m/44'/60'/0'/0/0
        assert_eq!(
            keypair.address(),
            "0x9858effd232b4033e47d90003d41ec34ecaeda94"
        );
    }

    #[test]
    fn test_derive_account_matches_keypair() {
        let seed = test_seed();
        let account = derive_account(&seed).unwrap();
        let keypair = Secp256k1Keypair::from_seed(&seed).unwrap();

        assert_eq!(account.address, keypair.address());
        assert_eq!(account.private_key.as_str(), keypair.private_key_hex().as_str());
        assert!(account.private_key.starts_with("0x"));
        assert_eq!(account.private_key.len(), 66);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let seed = test_seed();
        let first = derive_account(&seed).unwrap();
        let second = derive_account(&seed).unwrap();

        assert_eq!(first.address, second.address);
        assert_eq!(first.private_key.as_str(), second.private_key.as_str());
    }

    #[test]
    fn test_invalid_seed_length() {
        assert!(matches!(
            Secp256k1Keypair::from_seed(&[1u8; 32]),
            Err(Error::InvalidSeedLength(32))
        ));
        assert!(matches!(
            derive_account(&[]),
            Err(Error::InvalidSeedLength(0))
        ));
    }

    #[test]
    fn test_private_key_hex_roundtrip() {
        let keypair = Secp256k1Keypair::from_seed(&test_seed()).unwrap();
        let private_key = keypair.private_key_hex();

        let restored = Secp256k1Keypair::from_private_key_hex(&private_key).unwrap();
        assert_eq!(restored.address(), keypair.address());

        // Prefix is optional
        let restored = Secp256k1Keypair::from_private_key_hex(&private_key[2..]).unwrap();
        assert_eq!(restored.address(), keypair.address());
    }

    #[test]
    fn test_invalid_private_key_hex() {
        assert!(Secp256k1Keypair::from_private_key_hex("0x1234").is_err());
        assert!(Secp256k1Keypair::from_private_key_hex(&"zz".repeat(32)).is_err());
        // Zero is not a valid scalar
        assert!(Secp256k1Keypair::from_private_key_hex(&"00".repeat(32)).is_err());
    }

    #[test]
    fn test_checksum_address() {
        let keypair = Secp256k1Keypair::from_seed(&test_seed()).unwrap();
        let address = keypair.checksum_address();

        assert_eq!(address, "0x9858EfFD232B4033E47d90003D41EC34EcaEda94");
        assert_eq!(address.to_lowercase(), keypair.address());
    }

    #[test]
    fn test_checksum_encode_eip55_vector() {
        let bytes: [u8; 20] = hex::decode("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed")
            .unwrap()
            .try_into()
            .unwrap();
        assert_eq!(
            checksum_encode(&bytes),
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        );
    }

    #[test]
    fn test_public_key_formats() {
        let keypair = Secp256k1Keypair::from_seed(&test_seed()).unwrap();

        let uncompressed = keypair.public_key_uncompressed();
        assert_eq!(uncompressed[0], 0x04);

        let compressed = keypair.public_key_compressed();
        assert!(compressed[0] == 0x02 || compressed[0] == 0x03);
        assert_eq!(&compressed[1..], &uncompressed[1..33]);
    }

    #[test]
    fn test_sign_and_recover() {
        let keypair = Secp256k1Keypair::from_seed(&test_seed()).unwrap();
        let hash = [0x11u8; 32];

        let signature = keypair.sign_hash(&hash).unwrap();
        assert!(signature.v == 27 || signature.v == 28);

        let recovered = signature.recover_address(&hash).unwrap();
        assert_eq!(recovered, keypair.address_bytes());
    }

    #[test]
    fn test_signing_is_deterministic() {
        let keypair = Secp256k1Keypair::from_seed(&test_seed()).unwrap();
        let hash = [0x42u8; 32];

        assert_eq!(
            keypair.sign_hash(&hash).unwrap(),
            keypair.sign_hash(&hash).unwrap()
        );
    }

    #[test]
    fn test_debug_hides_private_key() {
        let account = derive_account(&test_seed()).unwrap();
        let debug = format!("{:?}", account);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(&account.private_key[2..]));
    }

    #[test]
    fn test_strip_hex_prefix() {
        assert_eq!(strip_hex_prefix("0xabc"), "abc");
        assert_eq!(strip_hex_prefix("0Xabc"), "abc");
        assert_eq!(strip_hex_prefix("abc"), "abc");
    }
}
